//! Line windows: the symbolic view of one axis through a cell
//!
//! A window is 9 cells long, 4 on each side of the center. Each cell is seen from one
//! color's point of view: `1` own stone, `0` empty, `x` blocked. A cell off the edge of
//! the board reads exactly like an opponent stone, so a wall stops a shape the same way
//! a blocking stone does.

use std::fmt;

use crate::board::{Axis, Board, Pos, Stone};

/// Cells on each side of the center
pub const WINDOW_REACH: i32 = 4;
/// Total window length
pub const WINDOW_LEN: usize = 2 * WINDOW_REACH as usize + 1;

pub const OWN: u8 = b'1';
pub const EMPTY: u8 = b'0';
pub const BLOCKED: u8 = b'x';

/// Fixed-length symbolic encoding of a line segment centered on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    cells: [u8; WINDOW_LEN],
}

impl Window {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Symbol at the center (always `OWN` for a window built around a stone of that color)
    #[inline]
    pub fn center(&self) -> u8 {
        self.cells[WINDOW_REACH as usize]
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Symbols are ASCII by construction
        f.write_str(std::str::from_utf8(&self.cells).map_err(|_| fmt::Error)?)
    }
}

/// Build the window along `axis` through `pos`, read from `color`'s point of view.
#[inline]
pub fn extract_window(board: &Board, pos: Pos, axis: Axis, color: Stone) -> Window {
    let (dr, dc) = axis.delta();
    let size = board.size();
    let mut cells = [BLOCKED; WINDOW_LEN];

    for (slot, step) in cells.iter_mut().zip(-WINDOW_REACH..=WINDOW_REACH) {
        *slot = match pos.offset(dr, dc, step, size) {
            None => BLOCKED,
            Some(p) => match board.get(p) {
                Stone::Empty => EMPTY,
                s if s == color => OWN,
                _ => BLOCKED,
            },
        };
    }

    Window { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_on_empty_board_center() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let w = extract_window(&board, Pos::new(7, 7), Axis::Horizontal, Stone::Black);
        assert_eq!(w.to_string(), "000010000");
        assert_eq!(w.center(), OWN);
    }

    #[test]
    fn test_edge_reads_as_blocked() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 1), Stone::White);
        let w = extract_window(&board, Pos::new(0, 1), Axis::Horizontal, Stone::White);
        assert_eq!(w.to_string(), "xxx010000");

        let w = extract_window(&board, Pos::new(0, 1), Axis::Vertical, Stone::White);
        assert_eq!(w.to_string(), "xxxx10000");
    }

    #[test]
    fn test_opponent_reads_as_blocked() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 8), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::White);
        let w = extract_window(&board, Pos::new(7, 7), Axis::Diagonal, Stone::Black);
        assert_eq!(w.to_string(), "000x11000");

        // Same cells from White's side
        let w = extract_window(&board, Pos::new(6, 6), Axis::Diagonal, Stone::White);
        assert_eq!(w.to_string(), "00001xx00");
    }

    #[test]
    fn test_anti_diagonal_direction() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 6), Stone::Black);
        let w = extract_window(&board, Pos::new(7, 7), Axis::AntiDiagonal, Stone::Black);
        // Positive step is (+1, -1), so (8, 6) sits right of center
        assert_eq!(w.to_string(), "000011000");
    }
}
