//! tick-tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `tick_tetris::{core,eventlog,input,term,types}`
//! and holds the run configuration shared by the binary.

pub mod config;

pub use tick_tetris_core as core;
pub use tick_tetris_eventlog as eventlog;
pub use tick_tetris_input as input;
pub use tick_tetris_term as term;
pub use tick_tetris_types as types;
