//! Collision detector - pure validity predicates
//!
//! Every positional query in the engine goes through [`is_valid_position`]:
//! a piece placement is legal iff none of its set shape cells leaves the
//! horizontal/bottom bounds or overlaps a filled board cell. Cells above
//! the visible field (`y < 0`) are permitted so fresh pieces can extend
//! past the top edge while spawning.

use blockfall_types::{Position, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

use crate::board::Board;
use crate::catalog::Tetrimino;

/// Whether `piece` may occupy `position` on `board`.
pub fn is_valid_position(board: &Board, piece: &Tetrimino, position: Position) -> bool {
    for (row, col) in piece.shape.cells() {
        let x = position.x + col as i8;
        let y = position.y + row as i8;

        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }

        // Above-field cells are allowed and carry no fill to collide with.
        if y < 0 {
            continue;
        }

        if board.is_filled(x, y) {
            return false;
        }
    }

    true
}

/// Whether `piece` can move to `position`. Alias of [`is_valid_position`].
pub fn can_move_to(board: &Board, piece: &Tetrimino, position: Position) -> bool {
    is_valid_position(board, piece, position)
}

/// Whether `piece` rotated once clockwise fits at `position` unchanged.
pub fn can_rotate(board: &Board, piece: &Tetrimino, position: Position) -> bool {
    is_valid_position(board, &piece.rotated(), position)
}

/// Whether moving `piece` to `position` would collide or leave the field.
pub fn will_collide(board: &Board, piece: &Tetrimino, position: Position) -> bool {
    !is_valid_position(board, piece, position)
}

/// Game-over check: a fresh piece that cannot occupy the fixed spawn
/// position already collides before play can continue.
pub fn is_game_over(board: &Board, piece: &Tetrimino) -> bool {
    let (x, y) = SPAWN_POSITION;
    !is_valid_position(board, piece, Position::new(x, y))
}
