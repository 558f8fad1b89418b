//! Five-in-a-row engine with a minimax opponent
//!
//! Freestyle Gomoku on an N x N board (15 x 15 by default):
//! - Black moves first, players alternate
//! - Five or more in a row on any axis wins (overlines count)
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Placement validation and win detection
//! - [`eval`]: Window extraction, shape classification and scoring
//! - [`search`]: Candidate generation and alpha-beta minimax
//! - [`engine`]: Engine façade with adaptive depth
//! - [`config`]: Tunables loaded from TOML
//! - [`ui`]: Desktop shell
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{rules, AIEngine, Board, Stone};
//!
//! let mut board = Board::new();
//! assert!(rules::place_stone(&mut board, 7, 7, Stone::Black));
//!
//! // Engine plays White at a fixed shallow depth
//! let mut engine = AIEngine::with_depth(2);
//! if let Some(pos) = engine.get_move(&board) {
//!     let (row, col) = (i32::from(pos.row), i32::from(pos.col));
//!     assert!(rules::place_stone(&mut board, row, col, Stone::White));
//!     assert!(!rules::check_win(&board, row, col, Stone::White));
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::{ConfigError, EngineConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
