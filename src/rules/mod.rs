//! Game rules for five-in-a-row
//!
//! This module is the surface the game flow talks to:
//! - Move validation and checked placement
//! - Win conditions (five or more in a row, overlines included)

pub mod placement;
pub mod win;

// Re-exports for convenient access
pub use placement::{is_valid_move, place_stone};
pub use win::{check_win, find_five_line, has_five_at_pos, has_five_in_row};
