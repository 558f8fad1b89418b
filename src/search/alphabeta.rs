//! Depth-limited minimax with alpha-beta pruning
//!
//! The engine's color maximizes and the opponent minimizes. Scores are `f64`; a
//! completed five is `±∞` so no heuristic total can ever outrank a forced result.
//!
//! # Features
//!
//! - Candidate pruning to a neighbourhood of existing stones
//! - Move ordering by local desirability for the side to move
//! - In-place place/remove around every recursive call; the board is restored on return
//! - Optional deadline with iterative deepening; an interrupted iteration is discarded
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::config::EvalConfig;
//! use gomoku::eval::Evaluator;
//! use gomoku::search::Searcher;
//!
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::new(Evaluator::new(&EvalConfig::default(), 15), 2);
//! let result = searcher.search(&mut board, Stone::White, 2);
//! assert!(result.best_move.is_some());
//! assert!(result.completed);
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone};
use crate::eval::Evaluator;
use crate::rules::{has_five_at_pos, has_five_in_row};

use super::movegen::candidate_moves;

/// Score of a completed five (negated when the opponent completes it)
pub const WIN_SCORE: f64 = f64::INFINITY;

/// Bounds on one search call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies to search
    pub depth: i32,
    /// Wall-clock budget. When set, depths `1..=depth` are searched in turn.
    pub time_limit: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(depth: i32) -> Self {
        Self {
            depth,
            time_limit: None,
        }
    }

    pub fn timed(depth: i32, time_limit: Duration) -> Self {
        Self {
            depth,
            time_limit: Some(time_limit),
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best fully searched root move. `None` at depth 0, on a full board, when the game is
    /// already over, or when the deadline passed before any root move was scored.
    pub best_move: Option<Pos>,
    /// Minimax value from the engine's point of view
    pub score: f64,
    /// Depth of the deepest completed iteration
    pub depth: i32,
    /// Nodes visited, interrupted iterations included
    pub nodes: u64,
    /// False when the deadline cut the search short before any iteration finished
    pub completed: bool,
}

impl SearchResult {
    #[inline]
    pub fn is_win(&self) -> bool {
        self.score == WIN_SCORE
    }

    #[inline]
    pub fn is_loss(&self) -> bool {
        self.score == -WIN_SCORE
    }
}

/// Alpha-beta searcher. Owns the evaluator and candidate radius; no state survives
/// between calls other than configuration.
#[derive(Debug, Clone)]
pub struct Searcher {
    evaluator: Evaluator,
    radius: u8,
    nodes: u64,
    deadline: Option<Instant>,
    aborted: bool,
}

impl Searcher {
    pub fn new(evaluator: Evaluator, radius: u8) -> Self {
        Self {
            evaluator,
            radius: radius.max(1),
            nodes: 0,
            deadline: None,
            aborted: false,
        }
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Fixed-depth search for `engine`, which is also the side to move.
    pub fn search(&mut self, board: &mut Board, engine: Stone, depth: i32) -> SearchResult {
        self.search_with_limits(board, engine, SearchLimits::depth(depth))
    }

    /// Search under `limits`.
    ///
    /// Without a time limit this is one pass at `limits.depth`. With one, depths
    /// `1..=limits.depth` are searched in turn and the deepest iteration that ran to
    /// completion is reported. A forced result ends the deepening early.
    pub fn search_with_limits(
        &mut self,
        board: &mut Board,
        engine: Stone,
        limits: SearchLimits,
    ) -> SearchResult {
        self.nodes = 0;
        self.aborted = false;
        self.deadline = limits.time_limit.map(|limit| Instant::now() + limit);

        if limits.time_limit.is_none() || limits.depth <= 1 {
            let (score, best_move) = self.search_root(board, engine, limits.depth);
            return SearchResult {
                best_move,
                score,
                depth: if self.aborted { 0 } else { limits.depth.max(0) },
                nodes: self.nodes,
                completed: !self.aborted,
            };
        }

        let mut result: Option<SearchResult> = None;
        for depth in 1..=limits.depth {
            let (score, best_move) = self.search_root(board, engine, depth);
            if self.aborted {
                tracing::warn!(depth, nodes = self.nodes, "search interrupted by deadline");
                match result {
                    Some(ref mut done) => done.nodes = self.nodes,
                    None => {
                        // Nothing finished; keep whatever root moves were fully scored
                        result = Some(SearchResult {
                            best_move,
                            score,
                            depth: 0,
                            nodes: self.nodes,
                            completed: false,
                        });
                    }
                }
                break;
            }

            let forced = score.is_infinite();
            result = Some(SearchResult {
                best_move,
                score,
                depth,
                nodes: self.nodes,
                completed: true,
            });
            if forced || best_move.is_none() {
                break;
            }
        }

        result.unwrap_or_else(|| SearchResult {
            best_move: None,
            score: self.evaluator.score_board(board, engine),
            depth: 0,
            nodes: self.nodes,
            completed: true,
        })
    }

    #[inline]
    fn out_of_time(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }

    /// Root node: `engine` to move, no previous move to test, so the board is scanned.
    fn search_root(&mut self, board: &mut Board, engine: Stone, depth: i32) -> (f64, Option<Pos>) {
        self.nodes += 1;

        if has_five_in_row(board, engine.opponent()) {
            return (-WIN_SCORE, None);
        }
        if has_five_in_row(board, engine) {
            return (WIN_SCORE, None);
        }
        if depth <= 0 {
            return (self.evaluator.score_board(board, engine), None);
        }

        let candidates = candidate_moves(board, engine, self.radius, &self.evaluator);

        let mut alpha = -WIN_SCORE;
        let beta = WIN_SCORE;
        let mut best_move = None;
        let mut best_score = -WIN_SCORE;

        for &pos in &candidates {
            if self.out_of_time() {
                break;
            }

            board.place_stone(pos, engine);
            let score = self.minimax(board, engine, engine.opponent(), depth - 1, alpha, beta, pos);
            board.remove_stone(pos);

            if self.aborted {
                break;
            }
            tracing::trace!(%pos, score, depth, "root candidate");

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            alpha = alpha.max(best_score);
            if beta <= alpha {
                break;
            }
        }

        // Only a candidate whose subtree was fully searched is ever reported
        match best_move {
            Some(_) => (best_score, best_move),
            None => (self.evaluator.score_board(board, engine), None),
        }
    }

    /// Value of the position after `last` was played by `to_move.opponent()`.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &mut Board,
        engine: Stone,
        to_move: Stone,
        depth: i32,
        mut alpha: f64,
        mut beta: f64,
        last: Pos,
    ) -> f64 {
        self.nodes += 1;

        let last_player = to_move.opponent();
        if has_five_at_pos(board, last, last_player) {
            return if last_player == engine {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }

        if depth <= 0 {
            return self.evaluator.score_board(board, engine);
        }

        let candidates = candidate_moves(board, to_move, self.radius, &self.evaluator);
        if candidates.is_empty() {
            return self.evaluator.score_board(board, engine);
        }

        let maximizing = to_move == engine;
        let mut best = if maximizing { -WIN_SCORE } else { WIN_SCORE };

        for &pos in &candidates {
            if self.out_of_time() {
                break;
            }

            board.place_stone(pos, to_move);
            let score = self.minimax(board, engine, to_move.opponent(), depth - 1, alpha, beta, pos);
            board.remove_stone(pos);

            if self.aborted {
                break;
            }

            if maximizing {
                if score > best {
                    best = score;
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                }
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}
