//! Event journal - append game events to a JSON-lines file
//!
//! The journal is the game's structured log. Each [`GameEvent`](core::GameEvent)
//! drained from the game can be handed to [`EventJournal::record`], which stamps
//! it with a sequence number and wall-clock timestamp and sends it to a writer
//! task running on a background tokio runtime.
//!
//! # Environment Variables
//!
//! - `TETRIS_EVENT_LOG_PATH`: journal file (unset or blank disables the journal)
//! - `TETRIS_EVENT_LOG_TICKS`: set to "0" or "false" to skip uptick/downtick records
//!
//! # Example Journal
//!
//! ```text
//! {"seq":1,"ts":1700000000000,"type":"clock","event":"start","state":"running","delay_ms":300,"ticks":0}
//! {"seq":2,"ts":1700000000012,"type":"move","piece":{"kind":"T","rotation":0,"x":4,"y":0}}
//! {"seq":3,"ts":1700000000300,"type":"lock","cells":[[4,20],[3,21],[4,21],[5,21]]}
//! ```

pub mod config;
pub mod journal;
pub mod record;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use config::JournalConfig;
pub use journal::{run_writer, EventJournal};
pub use record::{EventRecord, JournalRecord, PieceRecord};
