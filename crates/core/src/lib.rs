//! Rules engine - pure, deterministic falling-block game logic
//!
//! This crate owns the playing-field grid, the active and next piece,
//! legal movement and rotation, line-clear detection, scoring and leveling,
//! and the piece-sequence generator. It has no dependency on rendering,
//! keyboard wiring, or audio; those collaborators call in through the
//! session/driver API and read back snapshots and events.
//!
//! Everything is a synchronous computation over in-memory values. Boards
//! are immutable values (each mutation produces a new board), timing is
//! modeled as elapsed milliseconds fed into the driver, and the piece
//! sequence is reproducible from a seed.

pub mod board;
pub mod catalog;
pub mod collision;
pub mod driver;
pub mod generator;
pub mod movement;
pub mod repeat;
pub mod scoring;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use catalog::{color_of, spawn_shape, Shape, Tetrimino};
pub use collision::{can_move_to, can_rotate, is_game_over, is_valid_position, will_collide};
pub use driver::{Events, SessionDriver, SessionEvent};
pub use generator::{PieceGenerator, SeededRng};
pub use movement::{
    perform_wall_kick, place_piece, should_lock, try_move, try_rotate, KickPolicy, MoveOutcome,
    RotateOutcome, I_KICKS, STANDARD_KICKS,
};
pub use repeat::AutoRepeat;
pub use scoring::{crossed_level_boundary, drop_interval_ms, level_for_lines, line_clear_score};
pub use session::{initial_position, GameSession};
pub use snapshot::SessionSnapshot;
