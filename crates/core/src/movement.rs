//! Movement controller - directional moves, rotation with wall kicks,
//! and piece placement
//!
//! Rotation runs through one strategy, [`try_rotate`], parameterized by a
//! [`KickPolicy`]: the kick-aware path searches an ordered offset table for
//! a nearby legal placement, the bare path only accepts an in-place fit.
//! Both paths are transactional - a failed attempt returns the original
//! piece and position untouched.

use blockfall_types::{Direction, PieceKind, Position};

use crate::board::Board;
use crate::catalog::Tetrimino;
use crate::collision::is_valid_position;

/// Result of a directional move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub success: bool,
    pub position: Position,
}

/// Result of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateOutcome {
    pub success: bool,
    pub piece: Tetrimino,
    pub position: Position,
}

/// Whether a rotation attempt may search the kick table for a fallback
/// placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickPolicy {
    /// Search the kick offsets when the in-place rotation collides
    SearchKicks,
    /// Accept only an in-place fit of the rotated matrix
    NoKick,
}

/// Kick offsets for all pieces except I and O, tried strictly in order
pub const STANDARD_KICKS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];

/// Kick offsets for the I piece, tried strictly in order
pub const I_KICKS: [(i8, i8); 5] = [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)];

/// Try to move a piece one step in `direction`.
///
/// Returns the translated position on success, the original position
/// unchanged otherwise.
pub fn try_move(
    board: &Board,
    piece: &Tetrimino,
    position: Position,
    direction: Direction,
) -> MoveOutcome {
    let candidate = position.stepped(direction);
    if is_valid_position(board, piece, candidate) {
        MoveOutcome {
            success: true,
            position: candidate,
        }
    } else {
        MoveOutcome {
            success: false,
            position,
        }
    }
}

/// Find a legal position for an already-rotated piece near `position`.
///
/// O pieces need no kick and return the input position untouched. For the
/// rest, offsets are tried strictly in table order and the first valid
/// placement wins; the ordering decides which kick applies when several
/// are geometrically possible. `None` means every offset collided.
pub fn perform_wall_kick(
    board: &Board,
    rotated: &Tetrimino,
    position: Position,
    kind: PieceKind,
) -> Option<Position> {
    if kind == PieceKind::O {
        return Some(position);
    }

    let kicks: &[(i8, i8)] = if kind == PieceKind::I {
        &I_KICKS
    } else {
        &STANDARD_KICKS
    };

    kicks
        .iter()
        .map(|&(dx, dy)| position.translated(dx, dy))
        .find(|&candidate| is_valid_position(board, rotated, candidate))
}

/// Try to rotate a piece 90 degrees clockwise under the given kick policy.
///
/// With [`KickPolicy::SearchKicks`] the O piece succeeds trivially with the
/// unrotated piece (its matrix is rotation-symmetric), any other piece first
/// tries the rotated matrix in place and then the kick table. With
/// [`KickPolicy::NoKick`] only the in-place fit is accepted.
///
/// On failure the original piece and position come back unchanged.
pub fn try_rotate(
    board: &Board,
    piece: &Tetrimino,
    position: Position,
    policy: KickPolicy,
) -> RotateOutcome {
    if policy == KickPolicy::SearchKicks && piece.kind == PieceKind::O {
        return RotateOutcome {
            success: true,
            piece: *piece,
            position,
        };
    }

    let rotated = piece.rotated();

    if is_valid_position(board, &rotated, position) {
        return RotateOutcome {
            success: true,
            piece: rotated,
            position,
        };
    }

    if policy == KickPolicy::SearchKicks {
        if let Some(kicked) = perform_wall_kick(board, &rotated, position, piece.kind) {
            return RotateOutcome {
                success: true,
                piece: rotated,
                position: kicked,
            };
        }
    }

    RotateOutcome {
        success: false,
        piece: *piece,
        position,
    }
}

/// A new board with the piece's filled cells merged in, each carrying the
/// piece's color. Cells outside the field (including above it) are skipped.
pub fn place_piece(board: &Board, piece: &Tetrimino, position: Position) -> Board {
    let mut next = board.clone();
    for (row, col) in piece.shape.cells() {
        let x = position.x + col as i8;
        let y = position.y + row as i8;
        next = next.with_cell(x, y, Some(piece.color));
    }
    next
}

/// Whether the piece can no longer descend and should begin its lock
/// countdown.
pub fn should_lock(board: &Board, piece: &Tetrimino, position: Position) -> bool {
    !is_valid_position(board, piece, position.stepped(Direction::Down))
}
