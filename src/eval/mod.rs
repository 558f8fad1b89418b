//! Position evaluation
//!
//! - [`line`]: symbolic windows along an axis
//! - [`patterns`]: shape classification and weights
//! - [`heuristic`]: per-cell and whole-board scoring

pub mod heuristic;
pub mod line;
pub mod patterns;

pub use heuristic::{Evaluator, PositionTable};
pub use line::{extract_window, Window, WINDOW_LEN};
pub use patterns::{classify, PatternCounts, PatternWeights};
