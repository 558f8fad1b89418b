//! Heuristic evaluation of board positions
//!
//! Scores combine two ingredients:
//! - Pattern scoring: every stone's four windows are classified and weighted
//! - Positional bonus: a pyramid table peaking at the center
//!
//! The board score is asymmetric on purpose: the opponent's total is multiplied by
//! `opponent_factor` (> 1), so with raw scores close the engine prefers blocking.

use crate::board::{Axis, Board, Pos, Stone, MAX_BOARD_SIZE};
use crate::config::EvalConfig;

use super::line::extract_window;
use super::patterns::{classify, PatternCounts, PatternWeights};

/// Center-peaked weight per cell, built once per board side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTable {
    size: usize,
    weights: [[u8; MAX_BOARD_SIZE]; MAX_BOARD_SIZE],
}

impl PositionTable {
    /// Ring distance to the nearest edge: 0 on the border, `⌊(N-1)/2⌋` at the center.
    pub fn new(size: usize) -> Self {
        let size = size.min(MAX_BOARD_SIZE);
        let mut weights = [[0u8; MAX_BOARD_SIZE]; MAX_BOARD_SIZE];
        for (r, row) in weights.iter_mut().enumerate().take(size) {
            for (c, cell) in row.iter_mut().enumerate().take(size) {
                *cell = r.min(c).min(size - 1 - r).min(size - 1 - c) as u8;
            }
        }
        Self { size, weights }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn weight(&self, pos: Pos) -> u8 {
        self.weights[pos.row as usize][pos.col as usize]
    }
}

/// Position evaluator. Construct once per engine; every method is a pure function of
/// the board except the "what if" helpers, which restore the board before returning.
#[derive(Debug, Clone)]
pub struct Evaluator {
    weights: PatternWeights,
    table: PositionTable,
    positional_scale: f64,
    opponent_factor: f64,
    defense_factor: f64,
}

impl Evaluator {
    #[must_use]
    pub fn new(config: &EvalConfig, board_size: usize) -> Self {
        Self {
            weights: config.weights,
            table: PositionTable::new(board_size),
            positional_scale: config.positional_scale,
            opponent_factor: config.opponent_factor,
            defense_factor: config.defense_factor,
        }
    }

    /// Board side the positional table was built for
    #[inline]
    pub fn board_size(&self) -> usize {
        self.table.size()
    }

    /// `weight[row][col] × k`
    #[inline]
    pub fn position_bonus(&self, pos: Pos) -> f64 {
        f64::from(self.table.weight(pos)) * self.positional_scale
    }

    /// Shapes seen through `pos` on all four axes, from `color`'s side.
    pub fn cell_patterns(&self, board: &Board, pos: Pos, color: Stone) -> PatternCounts {
        Axis::ALL
            .iter()
            .map(|&axis| classify(extract_window(board, pos, axis, color).as_bytes()))
            .sum()
    }

    /// Pattern-only score of the windows through `pos`
    #[inline]
    pub fn pattern_score(&self, board: &Board, pos: Pos, color: Stone) -> f64 {
        self.weights.score(&self.cell_patterns(board, pos, color))
    }

    /// Score contribution of the `color` stone at `pos`: weighted shapes plus positional bonus.
    pub fn score_position(&self, board: &Board, pos: Pos, color: Stone) -> f64 {
        self.pattern_score(board, pos, color) + self.position_bonus(pos)
    }

    /// Shape totals over every stone of `color`. Overlapping windows from neighbouring
    /// stones count the same physical shape once per stone.
    pub fn pattern_census(&self, board: &Board, color: Stone) -> PatternCounts {
        board.stones(color).map_or_else(PatternCounts::default, |stones| {
            stones
                .iter_ones()
                .map(|pos| self.cell_patterns(board, pos, color))
                .sum()
        })
    }

    /// Σ `score_position` over all stones of `color`
    pub fn score_color(&self, board: &Board, color: Stone) -> f64 {
        let Some(stones) = board.stones(color) else {
            return 0.0;
        };
        stones
            .iter_ones()
            .map(|pos| self.score_position(board, pos, color))
            .sum()
    }

    /// Whole-board score from `engine`'s perspective:
    /// `Σ engine cells − opponent_factor × Σ opponent cells`.
    #[must_use]
    pub fn score_board(&self, board: &Board, engine: Stone) -> f64 {
        self.score_color(board, engine) - self.opponent_factor * self.score_color(board, engine.opponent())
    }

    /// Pattern score a `color` stone would have at the empty cell `pos`.
    ///
    /// The stone is placed and removed again; the board is unchanged on return.
    /// An occupied cell scores `0.0` and is left alone.
    pub fn placement_gain(&self, board: &mut Board, pos: Pos, color: Stone) -> f64 {
        if color == Stone::Empty || !board.is_empty(pos) {
            return 0.0;
        }
        board.place_stone(pos, color);
        let gain = self.pattern_score(board, pos, color);
        board.remove_stone(pos);
        gain
    }

    /// Move-ordering score of the empty cell `pos` for `mover`: positional bonus, what the
    /// mover builds there, and what the opponent would build there scaled by `defense_factor`.
    pub fn move_desirability(&self, board: &mut Board, pos: Pos, mover: Stone) -> f64 {
        self.position_bonus(pos)
            + self.placement_gain(board, pos, mover)
            + self.defense_factor * self.placement_gain(board, pos, mover.opponent())
    }
}
