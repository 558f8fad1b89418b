//! Main AI engine
//!
//! Wraps the searcher with everything a caller needs to pick a move: center opening
//! on an empty board, adaptive depth selection and an optional time budget.
//! The engine never places stones itself; the caller applies the returned move
//! through [`crate::rules::place_stone`] and re-checks the win.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Pos, Stone};
//!
//! let mut engine = AIEngine::with_depth(2);
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.compute_best_move(&board);
//! println!("Best move: {:?} ({} nodes, {}ms)", result.best_move, result.nodes, result.time_ms);
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone};
use crate::config::{ConfigError, DepthPolicy, EngineConfig};
use crate::eval::Evaluator;
use crate::search::{SearchLimits, SearchResult, Searcher};

/// How the move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Empty board: the center, no search
    Opening,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Move to play; `None` when no empty cell is worth playing or the game is over
    pub best_move: Option<Pos>,
    /// Minimax value from the engine's side (`±∞` for a forced result)
    pub score: f64,
    pub search_type: SearchType,
    /// Depth actually completed
    pub depth: i32,
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// False if a time limit interrupted the search before any depth finished
    pub completed: bool,
}

impl MoveResult {
    fn opening(pos: Pos, score: f64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type: SearchType::Opening,
            depth: 0,
            nodes: 0,
            time_ms: 0,
            completed: true,
        }
    }

    fn from_search(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            nodes: result.nodes,
            time_ms,
            completed: result.completed,
        }
    }
}

/// Minimax opponent for one color.
#[derive(Debug, Clone)]
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default configuration (White, adaptive depth 4/6).
    #[must_use]
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Engine from a configuration, validated first.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Default engine that always searches `depth` plies.
    #[must_use]
    pub fn with_depth(depth: i32) -> Self {
        Self::build(EngineConfig {
            depth: DepthPolicy::fixed(depth),
            ..EngineConfig::default()
        })
    }

    fn build(config: EngineConfig) -> Self {
        let evaluator = Evaluator::new(&config.eval, config.board_size);
        let searcher = Searcher::new(evaluator, config.ordering.radius);
        Self { config, searcher }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Color the engine plays and maximizes
    #[inline]
    pub fn color(&self) -> Stone {
        self.config.engine_color
    }

    /// Switch sides. `Empty` is ignored.
    pub fn set_color(&mut self, color: Stone) {
        if color != Stone::Empty {
            self.config.engine_color = color;
        }
    }

    pub fn set_depth_policy(&mut self, depth: DepthPolicy) {
        self.config.depth = depth;
    }

    pub fn set_time_limit(&mut self, time_limit: Option<Duration>) {
        self.config.time_limit_ms = time_limit.map(|d| d.as_millis().max(1) as u64);
    }

    /// Best move for the engine's color using the configured depth policy.
    pub fn compute_best_move(&mut self, board: &Board) -> MoveResult {
        let depth = self.config.depth.depth_for(board);
        self.compute_best_move_at_depth(board, depth)
    }

    /// Best move for the engine's color searching exactly `depth` plies.
    ///
    /// The caller's board is never touched; the search runs on a private copy.
    pub fn compute_best_move_at_depth(&mut self, board: &Board, depth: i32) -> MoveResult {
        self.fit_board(board);
        let color = self.color();

        if board.is_board_empty() {
            let center = board.center();
            tracing::debug!(%center, "opening at center");
            return MoveResult::opening(center, self.searcher.evaluator().score_board(board, color));
        }

        let limits = match self.config.time_limit_ms {
            Some(ms) => SearchLimits::timed(depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(depth),
        };

        let start = Instant::now();
        let mut scratch = board.clone();
        let result = self.searcher.search_with_limits(&mut scratch, color, limits);
        let time_ms = start.elapsed().as_millis() as u64;

        if !result.completed {
            tracing::warn!(
                requested = depth,
                time_ms,
                "time limit hit before the first iteration finished"
            );
        }
        tracing::debug!(
            engine = color.name(),
            best_move = ?result.best_move,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            time_ms,
            "engine move"
        );

        MoveResult::from_search(result, time_ms)
    }

    /// Best move only.
    #[must_use]
    pub fn get_move(&mut self, board: &Board) -> Option<Pos> {
        self.compute_best_move(board).best_move
    }

    /// Rebuild the evaluator when the board side differs from the one it was built for.
    fn fit_board(&mut self, board: &Board) {
        if self.searcher.evaluator().board_size() != board.size() {
            tracing::debug!(
                from = self.searcher.evaluator().board_size(),
                to = board.size(),
                "rebuilding positional table"
            );
            self.config.board_size = board.size();
            let evaluator = Evaluator::new(&self.config.eval, board.size());
            self.searcher = Searcher::new(evaluator, self.config.ordering.radius);
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
