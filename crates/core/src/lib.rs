//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and timing logic.
//! It has **zero dependencies** on the terminal or any I/O, making it:
//!
//! - **Deterministic**: Same seed and the same elapsed-time feed produce identical games
//! - **Testable**: The tick scheduler runs on virtual time, so tests never sleep
//! - **Portable**: Can run in any environment (terminal, headless, benchmarks)
//!
//! # Module Structure
//!
//! - [`board`]: 10x22 grid with bounds checks and line clearing
//! - [`pieces`]: Tetromino boxes and SRS rotation with wall kicks
//! - [`rng`]: seeded queue/pool piece supplier
//! - [`scoring`]: combo and dry-spell score tracking
//! - [`clock`]: pausable, countable tick scheduler
//! - [`game`]: the aggregate state machine tying everything together
//! - [`events`]: notifications queued by the game
//!
//! # Game Rules
//!
//! - **Hidden rows**: rows 0 and 1 are a concealed buffer; a piece that locks with
//!   any cell there ends the game
//! - **Rotation**: clockwise only, five kick attempts per turn
//! - **Hold**: store one piece for later use (once per locked piece)
//! - **Scoring**: `(rows + rows - 1) * combo` per clear
//! - **Speed**: each scoring clear multiplies the auto-drop interval by 99/100
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::Game;
//! use tick_tetris_types::GameAction;
//!
//! let mut game = Game::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One piece is now part of the grid
//! assert_eq!(game.board().filled_count(), 4);
//!
//! // Auto-drop is driven by elapsed time
//! game.advance(300);
//! for event in game.drain_events() {
//!     let _ = event.name();
//! }
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod events;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{Clock, ClockEvent, ClockSnapshot};
pub use config::GameConfig;
pub use events::GameEvent;
pub use game::Game;
pub use pieces::{try_rotate, PieceBox, Tetromino};
pub use rng::{PieceSupplier, SimpleRng};
pub use scoring::{calculate_points, ScoreKeeper, ScoreUpdate};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
