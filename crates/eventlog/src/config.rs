use std::env;
use std::path::PathBuf;

/// Environment variable naming the journal file
pub const EVENT_LOG_PATH_VAR: &str = "TETRIS_EVENT_LOG_PATH";

/// Event journal configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    /// Destination file; `None` disables the journal
    pub path: Option<PathBuf>,
    /// Also record clock uptick/downtick events
    pub include_ticks: bool,
}

impl JournalConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            include_ticks: true,
        }
    }

    /// Create from environment variables.
    ///
    /// `TETRIS_EVENT_LOG_PATH` enables the journal; `TETRIS_EVENT_LOG_TICKS=0`
    /// leaves the per-tick clock events out.
    pub fn from_env() -> Self {
        let path = env::var(EVENT_LOG_PATH_VAR).ok().and_then(|s| parse_path(&s));
        let include_ticks = env::var("TETRIS_EVENT_LOG_TICKS")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);

        Self {
            path,
            include_ticks,
        }
    }

    pub fn enabled(&self) -> bool {
        self.path.is_some()
    }
}

fn parse_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
