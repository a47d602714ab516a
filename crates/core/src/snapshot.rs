//! Session snapshot - the read surface for rendering consumers
//!
//! One serializable value carrying everything a renderer needs: the board
//! colors, the active piece and its position, the next-piece preview, the
//! counters, the status string, and the rows currently held in a clearing
//! window. Field casing follows the camelCase the original UI consumed.
//!
//! The rules engine itself never allocates; snapshots are built on demand
//! at the presentation boundary, where allocation is fine.

use serde::Serialize;

use crate::catalog::Tetrimino;
use crate::driver::SessionDriver;
use crate::session::GameSession;

/// Set cells of a shape matrix as (row, col) pairs
fn shape_cells(piece: &Tetrimino) -> Vec<(u8, u8)> {
    piece
        .shape
        .cells()
        .map(|(row, col)| (row as u8, col as u8))
        .collect()
}

/// The active piece and where it sits on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePieceSnapshot {
    pub kind: &'static str,
    pub color: &'static str,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub cells: Vec<(u8, u8)>,
}

/// The next-piece preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSnapshot {
    pub kind: &'static str,
    pub color: &'static str,
    pub cells: Vec<(u8, u8)>,
}

/// Everything a rendering consumer reads, as one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Rows top to bottom, each cell the fill color or `None`
    pub board: Vec<Vec<Option<&'static str>>>,
    pub active: Option<ActivePieceSnapshot>,
    pub next: Option<PreviewSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: &'static str,
    /// Rows being held for the clearing animation, if any
    pub clearing_rows: Vec<usize>,
}

impl SessionSnapshot {
    /// Snapshot a driver, including its clearing window
    pub fn capture(driver: &SessionDriver) -> Self {
        Self::from_session(driver.session(), driver.clearing_rows().unwrap_or(&[]))
    }

    /// Snapshot a bare session with externally supplied clearing rows
    pub fn from_session(session: &GameSession, clearing_rows: &[usize]) -> Self {
        let board = session
            .board()
            .rows()
            .map(|row| row.to_vec())
            .collect();

        let active = session.current().map(|piece| ActivePieceSnapshot {
            kind: piece.kind.as_str(),
            color: piece.color,
            rotation: piece.rotation,
            x: session.position().x,
            y: session.position().y,
            cells: shape_cells(piece),
        });

        let next = session.next_piece().map(|piece| PreviewSnapshot {
            kind: piece.kind.as_str(),
            color: piece.color,
            cells: shape_cells(piece),
        });

        Self {
            board,
            active,
            next,
            score: session.score(),
            level: session.level(),
            lines: session.lines(),
            status: session.status().as_str(),
            clearing_rows: clearing_rows.to_vec(),
        }
    }
}
