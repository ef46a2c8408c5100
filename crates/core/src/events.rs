//! Events emitted by the game, drained by renderers and the journal

use crate::clock::ClockEvent;
use crate::snapshot::ActiveSnapshot;
use crate::types::{Coord, PieceKind, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new active piece entered the board
    Spawn(ActiveSnapshot),
    /// Board area that needs repainting
    Update(Region),
    /// The active piece changed position
    Move(ActiveSnapshot),
    /// A rotation was attempted; carries the piece as it ended up
    Rotate(ActiveSnapshot),
    /// The active piece went to the hold slot
    Hold { held: PieceKind },
    /// Cells written into the grid by a lock
    Lock(Vec<Coord>),
    /// Rows removed after a lock, in scan order (possibly empty)
    Clear(Vec<usize>),
    Score { score: u32, combo: u32 },
    /// Re-emitted clock notification
    Clock(ClockEvent),
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Spawn(_) => "spawn",
            GameEvent::Update(_) => "update",
            GameEvent::Move(_) => "move",
            GameEvent::Rotate(_) => "rotate",
            GameEvent::Hold { .. } => "hold",
            GameEvent::Lock(_) => "lock",
            GameEvent::Clear(_) => "clear",
            GameEvent::Score { .. } => "score",
            GameEvent::Clock(event) => event.name(),
        }
    }
}
