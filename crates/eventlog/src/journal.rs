//! Journal runtime integration.
//!
//! Bridges the synchronous game loop with an async file writer: records travel
//! over an unbounded channel so recording never blocks a frame.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::JournalConfig;
use crate::core::GameEvent;
use crate::record::{is_tick, JournalRecord};

/// Append every received record as one JSON line; returns the number written
/// once the channel closes.
pub async fn run_writer(
    path: PathBuf,
    mut rx: mpsc::UnboundedReceiver<JournalRecord>,
) -> Result<u64> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .with_context(|| format!("failed to open event log {}", path.display()))?;

    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    let mut written = 0u64;

    while let Some(record) = rx.recv().await {
        buf.clear();
        serde_json::to_writer(&mut buf, &record)?;
        buf.push(b'\n');
        file.write_all(&buf).await?;
        written += 1;
    }

    file.flush().await?;
    Ok(written)
}

/// Running journal instance.
pub struct EventJournal {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<JournalRecord>>,
    writer: Option<JoinHandle<Result<u64>>>,
    include_ticks: bool,
    seq: u64,
}

impl EventJournal {
    /// Start the journal.
    ///
    /// Returns `None` when no path is configured.
    pub fn start(config: &JournalConfig) -> Result<Option<Self>> {
        let Some(path) = config.path.clone() else {
            return Ok(None);
        };

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (tx, rx) = mpsc::unbounded_channel::<JournalRecord>();
        let writer = rt.spawn(async move {
            let result = run_writer(path, rx).await;
            if let Err(err) = &result {
                eprintln!("[Journal] {:#}", err);
            }
            result
        });

        Ok(Some(Self {
            rt,
            tx: Some(tx),
            writer: Some(writer),
            include_ticks: config.include_ticks,
            seq: 0,
        }))
    }

    /// Start from environment variables.
    pub fn start_from_env() -> Result<Option<Self>> {
        Self::start(&JournalConfig::from_env())
    }

    /// Queue one event; never blocks
    pub fn record(&mut self, event: &GameEvent) {
        if !self.include_ticks && is_tick(event) {
            return;
        }
        self.seq += 1;
        let record = JournalRecord::new(self.seq, now_ms(), event);
        if let Some(tx) = &self.tx {
            // A closed channel means the writer already failed and reported it
            let _ = tx.send(record);
        }
    }

    /// Number of records queued so far
    pub fn recorded(&self) -> u64 {
        self.seq
    }

    /// Close the channel and wait for the writer to flush.
    pub fn finish(mut self) -> Result<u64> {
        self.tx.take();
        match self.writer.take() {
            Some(handle) => self.rt.block_on(handle)?,
            None => Ok(0),
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
