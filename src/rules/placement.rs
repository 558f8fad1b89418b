//! Move validation and checked placement
//!
//! Both functions take signed coordinates so that input translated from pointer
//! positions can be passed through unchanged; anything off the board is simply invalid.

use crate::board::{Board, Stone};

/// Whether `(row, col)` is on the board and empty.
#[must_use]
pub fn is_valid_move(board: &Board, row: i32, col: i32) -> bool {
    board.pos_at(row, col).is_some_and(|pos| board.is_empty(pos))
}

/// Place `color` at `(row, col)`.
///
/// Returns `false` and leaves the board untouched if the cell is occupied or off the board.
/// Use [`Board::try_place`] to learn why a placement failed.
pub fn place_stone(board: &mut Board, row: i32, col: i32, color: Stone) -> bool {
    match board.try_place(row, col, color) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(row, col, %err, "placement rejected");
            false
        }
    }
}
