//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell is empty or holds the color tag of a
//! locked piece kind. Rows 0 and 1 are the hidden spawn buffer; only rows 2..21
//! are ever checked for completion.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, Coord, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows reported by one clear pass
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by [`Board::clear_lines`], top to bottom
pub type ClearedRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Bounds predicate for piece movement: every coordinate is inside the grid
    /// and empty.
    pub fn fits(&self, coords: &[Coord]) -> bool {
        coords.iter().all(|&(x, y)| self.is_valid(x, y))
    }

    /// Write `kind` into each coordinate; coordinates outside the grid are skipped
    pub fn write_cells(&mut self, coords: &[Coord], kind: PieceKind) {
        for &(x, y) in coords {
            self.set(x, y, Some(kind));
        }
    }

    /// Borrow one row
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let y = y.min(BOARD_HEIGHT as usize - 1);
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`: every row above moves down one and row 0 becomes empty
    pub fn shift_down_into(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Remove every full visible row and return the indices that were removed.
    ///
    /// Scans from the first visible row downward. Removing row `y` only moves rows
    /// above it, so indices below `y` still refer to the grid as it was before
    /// the pass.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in HIDDEN_ROWS as usize..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                self.shift_down_into(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Copy the grid into a row-major 2D array
    pub fn to_rows(&self) -> [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let mut rows = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        rows
    }

    /// Build a board from text rows aligned to the bottom of the grid.
    ///
    /// Piece letters (`IJLOSTZ`) become filled cells; any other character is empty.
    /// Rows past the grid height and columns past the width are ignored.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);
        for (offset, line) in rows.iter().skip(skip).enumerate() {
            let y = (top + offset) as i8;
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = PieceKind::from_str(ch.encode_utf8(&mut [0; 4]));
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Render the grid as `X`/`.` rows, top to bottom
    pub fn to_ascii(&self) -> Vec<String> {
        (0..BOARD_HEIGHT as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|cell| if cell.is_some() { 'X' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
