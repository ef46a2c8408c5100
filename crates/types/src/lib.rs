//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the rules engine, the terminal front end and the event journal alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21)
//! - **Hidden rows**: rows 0 and 1 form the concealed spawn buffer; rows 2..21
//!   are the visible play area
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame budget of the terminal loop (~60 FPS) |
//! | `INITIAL_DELAY_MS` | 300 | Auto-drop interval of a fresh game |
//! | `MIN_DELAY_MS` | 50 | Floor for the accelerated auto-drop interval |
//! | `SPEEDUP_NUMERATOR / SPEEDUP_DENOMINATOR` | 99/100 | Delay multiplier per scoring clear |
//! | `DEFAULT_DAS_MS` | 200 | Delayed auto shift |
//! | `DEFAULT_ARR_MS` | 45 | Auto repeat rate |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::Spawn.rotate_cw(), Rotation::Right);
//! assert_eq!(Rotation::Left.rotate_cw(), Rotation::Spawn);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows, including the hidden buffer)
pub const BOARD_HEIGHT: u8 = 22;

/// Number of concealed rows at the top of the board
pub const HIDDEN_ROWS: u8 = 2;

/// Number of visible rows
pub const VISIBLE_HEIGHT: u8 = BOARD_HEIGHT - HIDDEN_ROWS;

/// Size of the supplier's output queue and refill pool (one of each kind)
pub const BAG_SIZE: usize = 7;

/// Number of upcoming pieces shown in the preview
pub const PREVIEW_LEN: usize = 5;

/// Frame budget of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Auto-drop interval at the start of a game
pub const INITIAL_DELAY_MS: u32 = 300;

/// The accelerated auto-drop interval never goes below this
pub const MIN_DELAY_MS: u32 = 50;

/// Delay multiplier applied after every scoring clear (99/100)
pub const SPEEDUP_NUMERATOR: u32 = 99;
pub const SPEEDUP_DENOMINATOR: u32 = 100;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 200;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 45;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in the order a fresh bag lists them before shuffling
    pub const ALL: [PieceKind; 7] = [
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::O,
        PieceKind::I,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter naming the shape
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Color tag written into the grid when a piece of this kind locks
    pub fn color(&self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::J => PieceColor::Blue,
            PieceKind::L => PieceColor::Orange,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::S => PieceColor::Lime,
            PieceKind::T => PieceColor::DarkMagenta,
            PieceKind::Z => PieceColor::Red,
        }
    }
}

/// Display color of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Lime,
    DarkMagenta,
    Red,
}

impl PieceColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "Cyan",
            PieceColor::Blue => "Blue",
            PieceColor::Orange => "Orange",
            PieceColor::Yellow => "Yellow",
            PieceColor::Lime => "Lime",
            PieceColor::DarkMagenta => "DarkMagenta",
            PieceColor::Red => "Red",
        }
    }

    /// 24-bit color used by the terminal renderer
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceColor::Cyan => (80, 220, 220),
            PieceColor::Blue => (80, 120, 220),
            PieceColor::Orange => (255, 165, 0),
            PieceColor::Yellow => (240, 220, 80),
            PieceColor::Lime => (100, 220, 120),
            PieceColor::DarkMagenta => (160, 60, 180),
            PieceColor::Red => (220, 80, 80),
        }
    }
}

/// Rotation states (Spawn = state 0, each step is a clockwise quarter turn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Spawn,
    Right,
    Flip,
    Left,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Spawn => Rotation::Right,
            Rotation::Right => Rotation::Flip,
            Rotation::Flip => Rotation::Left,
            Rotation::Left => Rotation::Spawn,
        }
    }

    /// Numeric rotation state in 0..4
    pub fn index(&self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Flip => 2,
            Rotation::Left => 3,
        }
    }

    /// Rotation for a numeric state (taken modulo 4)
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::Spawn,
            1 => Rotation::Right,
            2 => Rotation::Flip,
            _ => Rotation::Left,
        }
    }
}

/// Player-facing game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Hold,
    Pause,
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl ClockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::Stopped => "stopped",
            ClockState::Running => "running",
            ClockState::Paused => "paused",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with the color tag of a piece kind)
pub type Cell = Option<PieceKind>;

/// Absolute grid coordinate (x, y); y grows downward
pub type Coord = (i8, i8);

/// Enclosing rectangle of a changed board area, in grid cells.
///
/// `x`/`y` may be negative when a piece box hangs over the left or top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
}

impl Region {
    pub const fn new(x: i8, y: i8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle enclosing both regions
    pub fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = self.x.min(other.x) as i16;
        let top = self.y.min(other.y) as i16;
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Region {
            x: left as i8,
            y: top as i8,
            width: (right - left) as u8,
            height: (bottom - top) as u8,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub fn right(&self) -> i16 {
        self.x as i16 + self.width as i16
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i16 {
        self.y as i16 + self.height as i16
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        let (x, y) = (x as i16, y as i16);
        x >= self.x as i16 && x < self.right() && y >= self.y as i16 && y < self.bottom()
    }
}
