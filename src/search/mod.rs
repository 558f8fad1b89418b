//! Search module for the engine
//!
//! Contains:
//! - Candidate generation with proximity filtering and desirability ordering
//! - Minimax with alpha-beta pruning and an optional deadline

pub mod alphabeta;
pub mod movegen;

pub use alphabeta::{SearchLimits, SearchResult, Searcher, WIN_SCORE};
pub use movegen::{candidate_moves, nearby_cells};
