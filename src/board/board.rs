//! Board structure with occupancy queries and text diagrams

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },
    #[error("{0} is already occupied")]
    Occupied(Pos),
    #[error("cannot place an empty stone")]
    EmptyStone,
}

/// Errors from parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board side {0} is not between 5 and 16")]
    BadSize(usize),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },
    #[error("unexpected character {ch:?} in row {row}")]
    BadChar { row: usize, ch: char },
}

/// Square game board.
///
/// Stones are kept in one bitboard per color; `size` bounds every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    /// Empty 15x15 board
    pub fn new() -> Self {
        Self::with_size(BOARD_SIZE)
    }

    /// Empty board of the given side, clamped to the supported range.
    pub fn with_size(size: usize) -> Self {
        Self {
            size: size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE),
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Geometric center (`⌊N/2⌋`, `⌊N/2⌋`)
    #[inline]
    pub fn center(&self) -> Pos {
        let c = (self.size / 2) as u8;
        Pos::new(c, c)
    }

    /// Whether signed coordinates fall on the board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Convert signed coordinates into a position on this board
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        self.contains(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone without validation.
    /// Search uses this paired with `remove_stone`; game moves go through `try_place`.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(self.contains(i32::from(pos.row), i32::from(pos.col)));
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Checked placement: fails without mutating when the cell is off-board or taken.
    pub fn try_place(&mut self, row: i32, col: i32, stone: Stone) -> Result<Pos, MoveError> {
        if stone == Stone::Empty {
            return Err(MoveError::EmptyStone);
        }
        let pos = self.pos_at(row, col).ok_or(MoveError::OutOfBounds {
            row,
            col,
            size: self.size,
        })?;
        if !self.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }
        self.place_stone(pos, stone);
        Ok(pos)
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// All stones of both colors
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Number of cells still free
    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cell_count() - self.stone_count() as usize
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One row per line, `X` Black, `O` White, `.` empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size as u8 {
            let line: String = (0..self.size as u8)
                .map(|c| self.get(Pos::new(r, c)).symbol())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses the `Display` format. Whitespace inside a row is ignored, blank lines are skipped;
/// `B`/`W` are accepted as aliases of `X`/`O`.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ParseBoardError::BadSize(size));
        }

        let mut board = Board::with_size(size);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ParseBoardError::RaggedRow {
                    row: r,
                    found: row.len(),
                    expected: size,
                });
            }
            for (c, &ch) in row.iter().enumerate() {
                let stone = match ch {
                    '.' | '+' | '_' => continue,
                    'X' | 'x' | 'B' | 'b' => Stone::Black,
                    'O' | 'o' | 'W' | 'w' => Stone::White,
                    _ => return Err(ParseBoardError::BadChar { row: r, ch }),
                };
                board.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        Ok(board)
    }
}
