//! Pieces module - Tetromino boxes and SRS rotation
//!
//! Every piece carries a square occupancy mask ("box") whose top-left corner is
//! anchored at the piece's (x, y). Rotation transposes the box clockwise and then
//! tries five kick offsets taken from the shape family's offset table.
//! Reference: https://tetris.wiki/SRS
//!
//! Pieces know nothing about the board. Every movement is validated by a bounds
//! predicate supplied by the caller: it receives the absolute cells a candidate
//! placement would occupy and answers whether all of them are free.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{Coord, PieceColor, PieceKind, Region, Rotation};

/// Largest box edge (the I piece)
pub const MAX_BOX: usize = 5;

/// Number of kick attempts per rotation
pub const KICK_COUNT: usize = 5;

/// Spawn position for most pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Spawn position of the I piece, whose 5x5 box is wider
pub const I_SPAWN_POSITION: (i8, i8) = (2, 0);

/// Kick offsets indexed by `[rotation state][attempt]`
pub type KickTable = [[(i8, i8); KICK_COUNT]; 4];

/// Square occupancy mask of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceBox {
    size: u8,
    cells: [[bool; MAX_BOX]; MAX_BOX],
}

impl PieceBox {
    /// Build a box from rows of `X` (filled) and `.` (empty).
    ///
    /// The row count sets the box size; extra columns are ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len().min(MAX_BOX);
        let mut cells = [[false; MAX_BOX]; MAX_BOX];
        for (r, row) in rows.iter().take(size).enumerate() {
            for (c, ch) in row.chars().take(size).enumerate() {
                cells[r][c] = ch == 'X';
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Edge length of the box
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// Clockwise quarter turn: `new[row][col] = old[N-1-col][row]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_BOX]; MAX_BOX];
        for (row, new_row) in cells.iter_mut().enumerate().take(n) {
            for (col, cell) in new_row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - col][row];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Absolute cells of this box anchored at (x, y), in row-major order
    pub fn cells_at(&self, x: i8, y: i8) -> ArrayVec<Coord, 4> {
        let mut out = ArrayVec::new();
        let n = self.size as usize;
        for dy in 0..n {
            for dx in 0..n {
                if self.cells[dy][dx] {
                    let _ = out.try_push((x + dx as i8, y + dy as i8));
                }
            }
        }
        out
    }

    /// Rows of the box as `X`/space strings (for diagnostics and golden tests)
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let n = self.size as usize;
        self.cells[..n].iter().map(move |row| {
            row[..n]
                .iter()
                .map(|&filled| if filled { 'X' } else { ' ' })
                .collect()
        })
    }
}

/// Spawn box for a piece kind (rotation state 0)
pub fn spawn_box(kind: PieceKind) -> PieceBox {
    match kind {
        PieceKind::J => PieceBox::from_rows(&["X..", "XXX", "..."]),
        PieceKind::L => PieceBox::from_rows(&["..X", "XXX", "..."]),
        PieceKind::S => PieceBox::from_rows(&[".XX", "XX.", "..."]),
        PieceKind::Z => PieceBox::from_rows(&["XX.", ".XX", "..."]),
        PieceKind::T => PieceBox::from_rows(&[".X.", "XXX", "..."]),
        PieceKind::O => PieceBox::from_rows(&[".XX", ".XX", "..."]),
        PieceKind::I => PieceBox::from_rows(&[".....", ".....", ".XXXX", ".....", "....."]),
    }
}

/// Spawn position for a piece kind
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::I => I_SPAWN_POSITION,
        _ => SPAWN_POSITION,
    }
}

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_OFFSETS,
        PieceKind::I => &I_OFFSETS,
        _ => &JLSTZ_OFFSETS,
    }
}

/// Offsets shared by J, L, S, T and Z
const JLSTZ_OFFSETS: KickTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// The O piece never kicks; its offsets only keep the pivot steady
const O_OFFSETS: KickTable = [
    [(0, 0); KICK_COUNT],
    [(0, -1); KICK_COUNT],
    [(-1, -1); KICK_COUNT],
    [(-1, 0); KICK_COUNT],
];

const I_OFFSETS: KickTable = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// Translation for kick `attempt` when turning clockwise out of `from`
pub fn kick_offset(kind: PieceKind, from: Rotation, attempt: usize) -> (i8, i8) {
    let table = get_kick_table(kind);
    let to = from.rotate_cw();
    let (ox, oy) = table[from.index()][attempt];
    let (nx, ny) = table[to.index()][attempt];
    (ox - nx, oy - ny)
}

/// Try to rotate a box clockwise with wall kicks.
///
/// Returns `Some((new_box, new_rotation, (x, y)))` for the first kick whose cells
/// pass `bounds`, or `None` if every attempt is rejected.
pub fn try_rotate(
    kind: PieceKind,
    shape: &PieceBox,
    rotation: Rotation,
    x: i8,
    y: i8,
    bounds: impl Fn(&[Coord]) -> bool,
) -> Option<(PieceBox, Rotation, (i8, i8))> {
    let new_shape = shape.rotated_cw();
    let new_rotation = rotation.rotate_cw();

    (0..KICK_COUNT).find_map(|attempt| {
        let (dx, dy) = kick_offset(kind, rotation, attempt);
        let (nx, ny) = (x + dx, y + dy);
        if bounds(&new_shape.cells_at(nx, ny)) {
            Some((new_shape, new_rotation, (nx, ny)))
        } else {
            None
        }
    })
}

/// A movable tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    shape: PieceBox,
}

impl Tetromino {
    /// Create a tetromino with its kind's spawn box, orientation and position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::Spawn,
            x,
            y,
            shape: spawn_box(kind),
        }
    }

    /// Restore spawn box, orientation and position
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn shape(&self) -> &PieceBox {
        &self.shape
    }

    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Bounding box of the piece's mask in grid coordinates
    pub fn region(&self) -> Region {
        let n = self.shape.size();
        Region::new(self.x, self.y, n, n)
    }

    /// Absolute cells occupied by the piece
    pub fn coordinates(&self) -> ArrayVec<Coord, 4> {
        self.shape.cells_at(self.x, self.y)
    }

    /// Move by (dx, dy) if the destination passes `bounds`.
    ///
    /// Returns the resulting position; it equals the old one when blocked.
    pub fn move_by(&mut self, dx: i8, dy: i8, bounds: impl Fn(&[Coord]) -> bool) -> (i8, i8) {
        let (nx, ny) = (self.x + dx, self.y + dy);
        if bounds(&self.shape.cells_at(nx, ny)) {
            self.x = nx;
            self.y = ny;
        }
        (self.x, self.y)
    }

    /// Move down until blocked and return the resting position
    pub fn drop(&mut self, bounds: impl Fn(&[Coord]) -> bool) -> (i8, i8) {
        loop {
            let y = self.y;
            let (_, ny) = self.move_by(0, 1, &bounds);
            if ny == y {
                return (self.x, self.y);
            }
        }
    }

    /// Rotate clockwise with wall kicks; leaves the piece untouched if no kick fits
    pub fn rotate(&mut self, bounds: impl Fn(&[Coord]) -> bool) -> bool {
        match try_rotate(self.kind, &self.shape, self.rotation, self.x, self.y, bounds) {
            Some((shape, rotation, (x, y))) => {
                self.shape = shape;
                self.rotation = rotation;
                self.x = x;
                self.y = y;
                true
            }
            None => false,
        }
    }
}

/// `[Tetromino: T (3,0) 0]`; the alternate form (`{:#}`) also draws the box.
impl fmt::Display for Tetromino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Tetromino: {} ({},{}) {}]",
            self.kind.as_str(),
            self.x,
            self.y,
            self.rotation.index()
        )?;

        if f.alternate() {
            let edge = "-".repeat(self.shape.size() as usize);
            write!(f, "\n+{}+", edge)?;
            for row in self.shape.rows() {
                write!(f, "\n|{}|", row)?;
            }
            write!(f, "\n+{}+", edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: &[Coord]) -> bool {
        true
    }

    #[test]
    fn test_rotated_cw_transposes_t_box() {
        let rotated = spawn_box(PieceKind::T).rotated_cw();
        assert_eq!(rotated, PieceBox::from_rows(&[".X.", ".XX", ".X."]));
    }

    #[test]
    fn test_four_quarter_turns_restore_every_box() {
        for kind in PieceKind::ALL {
            let start = spawn_box(kind);
            let turned = start.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(turned, start, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_spawn_box_has_four_cells() {
        for kind in PieceKind::ALL {
            let piece = Tetromino::new(kind);
            assert_eq!(piece.coordinates().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_unobstructed_rotation_uses_first_offset() {
        // The first JLSTZ offsets are all zero, so the piece keeps its anchor.
        assert_eq!(kick_offset(PieceKind::T, Rotation::Spawn, 0), (0, 0));
        assert_eq!(kick_offset(PieceKind::T, Rotation::Left, 1), (-1, 0));
        assert_eq!(kick_offset(PieceKind::I, Rotation::Spawn, 1), (-1, 0));
    }

    #[test]
    fn test_o_offsets_cancel_over_a_full_turn() {
        let mut total = (0, 0);
        let mut rotation = Rotation::Spawn;
        for _ in 0..4 {
            let (dx, dy) = kick_offset(PieceKind::O, rotation, 0);
            total = (total.0 + dx, total.1 + dy);
            rotation = rotation.rotate_cw();
        }
        assert_eq!(total, (0, 0));
    }

    #[test]
    fn test_move_by_returns_new_position() {
        let mut piece = Tetromino::new(PieceKind::L);
        assert_eq!(piece.move_by(2, 3, open), (5, 3));
        assert_eq!(piece.position(), (5, 3));
    }

    #[test]
    fn test_region_matches_box_size() {
        assert_eq!(Tetromino::new(PieceKind::I).region(), Region::new(2, 0, 5, 5));
        assert_eq!(Tetromino::new(PieceKind::S).region(), Region::new(3, 0, 3, 3));
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut piece = Tetromino::new(PieceKind::J);
        piece.rotate(open);
        piece.move_by(1, 4, open);
        piece.reset();
        assert_eq!(piece, Tetromino::new(PieceKind::J));
    }
}
