//! Terminal front end for the game.
//!
//! Renders into a simple framebuffer that is diffed and flushed to a crossterm
//! backend, avoiding widget/layout libraries so the view keeps exact control over
//! cell aspect ratio (2 columns per board cell by default).
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure snapshot → framebuffer mapping
//! - [`renderer`]: diffed terminal output
//! - [`dirty`]: redraw tracking driven by game events

pub mod dirty;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use dirty::DirtyRegion;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, FrameLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
