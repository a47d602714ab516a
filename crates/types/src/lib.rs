//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental vocabulary used throughout the engine.
//! All types are pure data with no external dependencies, making them usable
//! in any context (rules engine, rendering consumers, headless drivers).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn check position**: (3, 0)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Gravity speed-up per level |
//! | `MIN_DROP_MS` | 100 | Gravity interval floor |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Fixed gravity interval while soft-dropping |
//! | `LOCK_DELAY_MS` | 1000 | Grace period once a piece is grounded |
//! | `ROTATE_LOCK_DELAY_MS` | 500 | Grace period re-armed by a grounded rotation |
//! | `LINE_CLEAR_PAUSE_MS` | 500 | Clearing window held for render consumers |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, GameStatus, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(GameStatus::Idle.as_str(), "idle");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed spawn-check position for fresh pieces (x, y).
///
/// A piece that cannot occupy this position on an updated board is the
/// game-over condition, independent of the centered position it would
/// actually spawn at.
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Gravity interval at level 1 (1000ms = one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval decrease per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor at fast levels
pub const MIN_DROP_MS: u32 = 100;

/// Fixed gravity interval while the player holds soft drop
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Grace period between grounding and lock commit
pub const LOCK_DELAY_MS: u32 = 1000;

/// Grace period re-armed by a successful rotation while grounded
pub const ROTATE_LOCK_DELAY_MS: u32 = 500;

/// How long a completed-row set is held before compaction, so rendering
/// consumers can animate it
pub const LINE_CLEAR_PAUSE_MS: u32 = 500;

/// Held-key auto-repeat: delay before repeating starts
pub const REPEAT_DELAY_MS: u32 = 100;

/// Held-key auto-repeat: interval between repeats
pub const REPEAT_INTERVAL_MS: u32 = 30;

/// Level cap
pub const MAX_LEVEL: u32 = 10;

/// Lines per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// The seven tetrimino piece kinds
///
/// Each kind has a fixed shape matrix and color in the piece catalog:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// All piece kinds in catalog order
pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::I,
    PieceKind::O,
    PieceKind::T,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::J,
    PieceKind::L,
];

impl PieceKind {
    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Session lifecycle status
///
/// `Idle → Playing ⇄ Paused`, and `Playing → GameOver`. Game over is
/// terminal until a full reset returns the session to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Convert to the status string exposed to rendering consumers
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Single-step movement direction for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// Parse direction from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Down => "down",
        }
    }
}

/// Commands accepted from the input collaborator
///
/// Every gameplay command is gated by the driver on `Playing` status with
/// no clearing window pending; `Pause` toggles between playing and paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    MoveLeft,
    MoveRight,
    SoftDropStart,
    SoftDropStop,
    Rotate,
    Pause,
}

impl InputCommand {
    /// Parse command from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputCommand::MoveLeft),
            "moveright" => Some(InputCommand::MoveRight),
            "softdropstart" => Some(InputCommand::SoftDropStart),
            "softdropstop" => Some(InputCommand::SoftDropStop),
            "rotate" => Some(InputCommand::Rotate),
            "pause" => Some(InputCommand::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputCommand::MoveLeft => "moveLeft",
            InputCommand::MoveRight => "moveRight",
            InputCommand::SoftDropStart => "softDropStart",
            InputCommand::SoftDropStop => "softDropStop",
            InputCommand::Rotate => "rotate",
            InputCommand::Pause => "pause",
        }
    }
}

/// Grid coordinates of a piece's shape-matrix origin (top-left)
///
/// `y` may be negative while a freshly spawned piece still extends above
/// the visible field; a settled piece's filled cells are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The position shifted by the given deltas
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The position one step in `direction`
    pub fn stepped(&self, direction: Direction) -> Self {
        match direction {
            Direction::Left => self.translated(-1, 0),
            Direction::Right => self.translated(1, 0),
            Direction::Down => self.translated(0, 1),
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty cell
/// - `Some(color)`: cell filled with the catalog color of the piece that
///   produced it
///
/// Encoding the color inside the option makes "empty cells carry no color"
/// hold by construction.
pub type Cell = Option<&'static str>;
