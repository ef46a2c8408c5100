use crate::clock::ClockSnapshot;
use crate::pieces::Tetromino;
use crate::types::{Cell, Coord, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: [Coord; 4],
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        let mut cells = [(0, 0); 4];
        for (slot, coord) in cells.iter_mut().zip(value.coordinates()) {
            *slot = coord;
        }
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: [PieceKind; PREVIEW_LEN],
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub combo: u32,
    pub clock: ClockSnapshot,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.clock.state == crate::types::ClockState::Paused
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.clock.state == crate::types::ClockState::Running
    }

    /// Cells of the ghost piece (the active piece moved to its resting row)
    pub fn ghost_cells(&self) -> Option<[Coord; 4]> {
        let active = self.active?;
        let dy = self.ghost_y? - active.y;
        let mut cells = active.cells;
        for cell in cells.iter_mut() {
            cell.1 += dy;
        }
        Some(cells)
    }
}
