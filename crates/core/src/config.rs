use crate::types::{
    INITIAL_DELAY_MS, MIN_DELAY_MS, SPEEDUP_DENOMINATOR, SPEEDUP_NUMERATOR,
};

/// Rules parameters for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed of the piece supplier
    pub seed: u32,
    /// Auto-drop interval at the start of a game
    pub initial_delay_ms: u32,
    /// Floor for the accelerated interval
    pub min_delay_ms: u32,
    /// Interval multiplier applied after each scoring clear, as (numerator, denominator)
    pub speedup: (u32, u32),
    /// Stop the clock after this many ticks
    pub max_ticks: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            initial_delay_ms: INITIAL_DELAY_MS,
            min_delay_ms: MIN_DELAY_MS,
            speedup: (SPEEDUP_NUMERATOR, SPEEDUP_DENOMINATOR),
            max_ticks: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
