//! Run configuration for the terminal binary.
//!
//! # Environment Variables
//!
//! - `TETRIS_SEED`: piece supplier seed (default: derived from the system clock)
//! - `TETRIS_INITIAL_DELAY_MS`: auto-drop interval of a fresh game (default: 300)
//! - `TETRIS_DAS_MS`: delayed auto shift (default: 200)
//! - `TETRIS_ARR_MS`: auto repeat rate (default: 45)
//! - `TETRIS_EVENT_LOG_PATH`: event journal file (default: disabled)
//!
//! Unparseable values fall back to the defaults.

use std::env;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::GameConfig;
use crate::eventlog::JournalConfig;
use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub game: GameConfig,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub journal: JournalConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            journal: JournalConfig::default(),
        }
    }
}

impl RunConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let game = GameConfig {
            seed: env_parse("TETRIS_SEED").unwrap_or_else(clock_seed),
            initial_delay_ms: env_parse("TETRIS_INITIAL_DELAY_MS")
                .unwrap_or(defaults.game.initial_delay_ms),
            ..defaults.game
        };

        Self {
            game,
            das_ms: env_parse("TETRIS_DAS_MS").unwrap_or(defaults.das_ms),
            arr_ms: env_parse("TETRIS_ARR_MS").unwrap_or(defaults.arr_ms),
            journal: JournalConfig::from_env(),
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
