//! DAS/ARR input handler for terminal environments.
//!
//! Holding a movement key repeats its action: nothing until the DAS delay has
//! passed, then one repeat per ARR interval. Terminals that never report key
//! releases are handled with an idle timeout measured on the same elapsed-time
//! feed, so the handler stays deterministic under test.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Upper bound on repeats produced by one update
pub const MAX_REPEATS: usize = 32;

// A single tap must not turn into a sustained hold when no release event arrives.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// DAS timer plus ARR accumulator for one held key
#[derive(Debug, Clone, Copy, Default)]
struct Repeater {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeater {
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of repeats produced by `elapsed_ms` more holding
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        let previous = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das {
            return 0;
        }

        self.arr_accumulator += if previous < das {
            self.das_timer - das
        } else {
            elapsed_ms
        };

        let arr = arr.max(1);
        let repeats = self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        repeats
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    horizontal_repeat: Repeater,
    down_repeat: Repeater,
    /// Time since the last movement key press
    idle_ms: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            horizontal_repeat: Repeater::default(),
            down_repeat: Repeater::default(),
            idle_ms: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn das_delay(&self) -> u32 {
        self.das_delay
    }

    pub fn arr_rate(&self) -> u32 {
        self.arr_rate
    }

    /// Record a key press; returns the immediate action for a newly held
    /// movement key. Repeated press events of an already held key (terminal
    /// auto-repeat) only refresh the idle timeout.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let direction = match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') | KeyCode::Char('A') => {
                HorizontalDirection::Left
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') | KeyCode::Char('D') => {
                HorizontalDirection::Right
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.idle_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.clear();
                return Some(GameAction::SoftDrop);
            }
            _ => return None,
        };

        self.idle_ms = 0;
        if self.horizontal == direction {
            return None;
        }
        self.horizontal = direction;
        self.horizontal_repeat.clear();
        direction.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.release_horizontal(HorizontalDirection::Left);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.release_horizontal(HorizontalDirection::Right);
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.down_held = false;
                self.down_repeat.clear();
            }
            _ => {}
        }
    }

    /// Advance held keys by `elapsed_ms` and collect the repeats that came due
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS> {
        let mut actions = ArrayVec::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_repeat.clear();
            self.down_held = false;
            self.down_repeat.clear();
        }

        if let Some(action) = self.horizontal.action() {
            let repeats = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..repeats {
                let _ = actions.try_push(action);
            }
        }

        if self.down_held {
            let repeats = self
                .down_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..repeats {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.horizontal_repeat.clear();
        self.down_repeat.clear();
        self.idle_ms = 0;
    }

    fn release_horizontal(&mut self, direction: HorizontalDirection) {
        if self.horizontal == direction {
            self.horizontal = HorizontalDirection::None;
            self.horizontal_repeat.clear();
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        assert!(ih.update(99).is_empty());
        // Exactly at DAS there is no excess to repeat with yet
        assert!(ih.update(1).is_empty());
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(
            ih.update(50).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_defaults_match_controller_timing() {
        let ih = InputHandler::new();
        assert_eq!(ih.das_delay(), 200);
        assert_eq!(ih.arr_rate(), 45);
        assert!(ih.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_repeated_press_is_not_a_new_action() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_auto_release_after_idle_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(ih.update(51).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_idle_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(ih.update(30).is_empty());
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
        assert!(ih.update(30).is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_soft_drop_repeats_with_same_timing() {
        let mut ih = InputHandler::with_config(100, 50).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDrop));
        assert!(ih.update(149).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
    }

    #[test]
    fn test_release_and_reset_stop_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty());
        ih.handle_key_release(KeyCode::Left);
        assert!(ih.update(200).is_empty());

        ih.handle_key_press(KeyCode::Down);
        assert!(!ih.update(200).is_empty());
        ih.reset();
        assert!(ih.update(200).is_empty());
    }
}
