//! Win condition checking
//!
//! A player wins by completing five or more stones in a row along any axis.

use crate::board::{Axis, Board, Pos, Stone};

/// Count consecutive `color` stones from `pos` along `(dr, dc)`, excluding `pos` itself.
#[inline]
fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let size = board.size();
    (1..)
        .map_while(|dist| pos.offset(dr, dc, dist, size))
        .take_while(|&p| board.get(p) == color)
        .count()
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks the 4 axes through `pos`. No allocation.
/// `pos` is expected to hold `color` (the stone just placed).
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    Axis::ALL.iter().any(|axis| {
        let (dr, dc) = axis.delta();
        1 + run_length(board, pos, dr, dc, color) + run_length(board, pos, -dr, -dc, color) >= 5
    })
}

/// Turn-resolution check after a confirmed placement at `(row, col)`.
///
/// True iff the cell holds `color` and lies on five or more consecutive `color`
/// stones. Off-board coordinates or an `Empty` color never win.
#[must_use]
pub fn check_win(board: &Board, row: i32, col: i32, color: Stone) -> bool {
    if color == Stone::Empty {
        return false;
    }
    board
        .pos_at(row, col)
        .is_some_and(|pos| board.get(pos) == color && has_five_at_pos(board, pos, color))
}

/// Check if there's 5+ in a row anywhere for the given color
pub fn has_five_in_row(board: &Board, color: Stone) -> bool {
    board
        .stones(color)
        .is_some_and(|stones| stones.iter_ones().any(|pos| has_five_at_pos(board, pos, color)))
}

/// The first five cells of a winning line through `pos`, ordered along the axis.
///
/// Used to highlight the win; `None` if `pos` does not complete five for `color`.
pub fn find_five_line(board: &Board, pos: Pos, color: Stone) -> Option<[Pos; 5]> {
    let size = board.size();
    for axis in Axis::ALL {
        let (dr, dc) = axis.delta();
        let back = run_length(board, pos, -dr, -dc, color);
        let forward = run_length(board, pos, dr, dc, color);
        if back + forward + 1 < 5 {
            continue;
        }
        let start = pos.offset(-dr, -dc, back as i32, size)?;
        let mut line = [start; 5];
        for (i, cell) in line.iter_mut().enumerate() {
            *cell = start.offset(dr, dc, i as i32, size)?;
        }
        return Some(line);
    }
    None
}
