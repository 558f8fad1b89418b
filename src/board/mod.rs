//! Board representation for five-in-a-row

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, MoveError, ParseBoardError};

/// Default board side (15x15)
pub const BOARD_SIZE: usize = 15;
/// Smallest side on which five in a row is possible
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest side the bitboards can hold
pub const MAX_BOARD_SIZE: usize = 16;
/// Bit capacity of a bitboard (row stride is always `MAX_BOARD_SIZE`)
pub const MAX_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 256

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Diagram character: `X` for Black, `O` for White, `.` for empty
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
            Stone::Empty => '.',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

/// One of the four line directions through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Unit step `(dr, dc)` in the positive direction of the axis
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < MAX_BOARD_SIZE as u8 && col < MAX_BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Bit index with a fixed stride, independent of the board side.
    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * MAX_BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / MAX_BOARD_SIZE) as u8,
            col: (idx % MAX_BOARD_SIZE) as u8,
        }
    }

    /// Step `dist` cells along `(dr, dc)`; `None` when leaving the `size`x`size` grid.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, dist: i32, size: usize) -> Option<Pos> {
        let r = i32::from(self.row) + dr * dist;
        let c = i32::from(self.col) + dc * dist;
        if r >= 0 && c >= 0 && (r as usize) < size && (c as usize) < size {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
