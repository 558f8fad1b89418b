//! Desktop shell built on eframe/egui
//!
//! The engine runs on a worker thread; the window only polls for its answer.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{format_clock, AiTask, GameMode, GameResult, GameState};
