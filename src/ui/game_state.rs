//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{DepthPolicy, EngineConfig};
use crate::eval::{Evaluator, PatternCounts};
use crate::rules::{check_win, find_five_line, place_stone};
use crate::{AIEngine, Board, MoveResult, Pos, Stone};

/// Depth used for PvP hints
const HINT_DEPTH: i32 = 2;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Player vs AI
    #[default]
    PvE,
    /// Player vs Player (hotseat)
    PvP,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::PvE => "PvE",
            GameMode::PvP => "PvP - Hotseat",
        }
    }
}

/// What the worker thread is computing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTask {
    /// Engine reply, played as soon as it arrives
    Move,
    /// Suggestion for the side to move, only displayed
    Hint,
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        task: AiTask,
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    /// `Empty` for a draw on a full board
    pub winner: Stone,
    pub winning_line: Option<[Pos; 5]>,
}

/// Wall clocks shown in the side panel
pub struct MoveTimer {
    pub game_start: Instant,
    /// Frozen game length once the game is over
    pub game_length: Option<Duration>,
    pub turn_start: Instant,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            game_start: now,
            game_length: None,
            turn_start: now,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start_turn(&mut self) {
        self.turn_start = Instant::now();
    }

    pub fn turn_elapsed(&self) -> Duration {
        self.turn_start.elapsed()
    }

    pub fn game_elapsed(&self) -> Duration {
        self.game_length.unwrap_or_else(|| self.game_start.elapsed())
    }

    pub fn finish(&mut self) {
        self.game_length.get_or_insert_with(|| self.game_start.elapsed());
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// `mm:ss`
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    engine: AIEngine,
}

impl GameState {
    /// New game. An invalid `config` falls back to the defaults.
    pub fn new(mode: GameMode, config: EngineConfig) -> Self {
        let engine = AIEngine::from_config(config).unwrap_or_else(|err| {
            tracing::warn!(%err, "rejected engine config, using defaults");
            AIEngine::new()
        });
        Self {
            board: Board::with_size(engine.config().board_size),
            mode,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            engine,
        }
    }

    /// Empty board, Black to move; clocks and engine results are left alone
    fn clear_position(&mut self) {
        self.board = Board::with_size(self.board.size());
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.suggested_move = None;
        self.message = None;
    }

    pub fn reset(&mut self) {
        self.clear_position();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        tracing::info!(mode = self.mode.label(), "new game");
    }

    /// Switching mode always restarts the game.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn engine_color(&self) -> Stone {
        self.engine.color()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE => self.current_turn != self.engine.color(),
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.mode == GameMode::PvE && self.current_turn == self.engine.color()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt a human move at the given cell
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos)
    }

    /// Place the current player's stone and resolve the turn (both human and AI)
    fn execute_move(&mut self, pos: Pos) -> Result<(), String> {
        let color = self.current_turn;
        let (row, col) = (i32::from(pos.row), i32::from(pos.col));

        if !place_stone(&mut self.board, row, col, color) {
            return Err(format!("Cannot play at {pos}"));
        }

        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;

        if check_win(&self.board, row, col, color) {
            tracing::info!(winner = color.name(), %pos, moves = self.move_history.len(), "game over");
            self.game_over = Some(GameResult {
                winner: color,
                winning_line: find_five_line(&self.board, pos, color),
            });
            self.move_timer.finish();
            return Ok(());
        }

        if self.board.empty_count() == 0 {
            tracing::info!("board full, draw");
            self.game_over = Some(GameResult {
                winner: Stone::Empty,
                winning_line: None,
            });
            self.move_timer.finish();
            return Ok(());
        }

        self.current_turn = color.opponent();
        self.move_timer.start_turn();
        Ok(())
    }

    /// Start the engine on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }
        self.spawn_worker(AiTask::Move, self.engine.clone());
    }

    /// Run `engine` on a snapshot of the board; the answer comes back through
    /// [`GameState::check_ai_result`].
    fn spawn_worker(&mut self, task: AiTask, mut engine: AIEngine) {
        let board = self.board.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.compute_best_move(&board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            task,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Collect the worker's answer, if any: play an engine move or show a hint
    pub fn check_ai_result(&mut self) {
        let answer = match &self.ai_state {
            AiState::Thinking {
                task,
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((*task, result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("engine worker exited without a move");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((task, result, elapsed)) = answer else {
            return;
        };
        self.ai_state = AiState::Idle;

        match task {
            AiTask::Hint => {
                self.suggested_move = result.best_move;
                self.last_ai_result = Some(result);
            }
            AiTask::Move => self.apply_engine_move(result, elapsed),
        }
    }

    fn apply_engine_move(&mut self, result: MoveResult, elapsed: Duration) {
        self.move_timer.set_ai_time(elapsed);
        let (best_move, completed) = (result.best_move, result.completed);
        self.last_ai_result = Some(result);

        match best_move {
            Some(pos) => {
                if let Err(msg) = self.execute_move(pos) {
                    tracing::warn!(%pos, "engine proposed an illegal move");
                    self.message = Some(msg);
                } else if !completed {
                    self.message = Some("AI ran out of time (partial search)".to_string());
                }
            }
            None if !completed => {
                // Not a single root move was scored in time: answer with an untimed 1-ply search
                tracing::warn!("no move scored before the deadline, retrying at depth 1");
                let mut engine = self.engine.clone();
                engine.set_time_limit(None);
                engine.set_depth_policy(DepthPolicy::fixed(1));
                self.spawn_worker(AiTask::Move, engine);
            }
            None => self.message = Some("AI could not find a move".to_string()),
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Shape counts for `color` on the current board, for the debug panel
    pub fn pattern_census(&self, color: Stone) -> PatternCounts {
        Evaluator::new(&self.engine.config().eval, self.board.size()).pattern_census(&self.board, color)
    }

    /// Ask the worker for a shallow suggestion for the side to move
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }

        let mut engine = self.engine.clone();
        engine.set_color(self.current_turn);
        engine.set_depth_policy(DepthPolicy::fixed(HINT_DEPTH));
        self.spawn_worker(AiTask::Hint, engine);
    }

    /// Task the worker is busy with
    pub fn ai_task(&self) -> Option<AiTask> {
        match &self.ai_state {
            AiState::Thinking { task, .. } => Some(*task),
            AiState::Idle => None,
        }
    }

    /// Take back the last ply (PvP) or the last human+engine pair (PvE)
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE if self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        let keep = self.move_history.len() - undo_count;
        let replay = self.move_history[..keep].to_vec();
        self.clear_position();
        self.move_timer.game_length = None;

        for (pos, color) in replay {
            self.board.place_stone(pos, color);
            self.move_history.push((pos, color));
            self.last_move = Some(pos);
            self.current_turn = color.opponent();
        }

        self.move_timer.start_turn();
        tracing::debug!(undone = undo_count, remaining = self.move_history.len(), "undo");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchType;

    fn fast_config() -> EngineConfig {
        EngineConfig {
            depth: DepthPolicy::fixed(1),
            ..EngineConfig::default()
        }
    }

    fn pvp() -> GameState {
        GameState::new(GameMode::PvP, fast_config())
    }

    fn wait_for_worker(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
            state.check_ai_result();
        }
        assert!(!state.is_ai_thinking());
    }

    #[test]
    fn test_pvp_alternates_turns() {
        let mut state = pvp();
        assert!(state.try_place_stone(Pos::new(7, 7)).is_ok());
        assert_eq!(state.current_turn, Stone::White);
        assert!(state.try_place_stone(Pos::new(7, 8)).is_ok());
        assert_eq!(state.current_turn, Stone::Black);
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.last_move, Some(Pos::new(7, 8)));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(state.try_place_stone(Pos::new(7, 7)).is_err());
        assert_eq!(state.current_turn, Stone::White);
        assert_eq!(state.move_history.len(), 1);
    }

    #[test]
    fn test_five_ends_game_with_line() {
        let mut state = pvp();
        for i in 0..4 {
            state.try_place_stone(Pos::new(3, i)).unwrap();
            state.try_place_stone(Pos::new(10, i)).unwrap();
        }
        state.try_place_stone(Pos::new(3, 4)).unwrap();

        let result = state.game_over.unwrap();
        assert_eq!(result.winner, Stone::Black);
        let line = result.winning_line.unwrap();
        assert_eq!(line[0], Pos::new(3, 0));
        assert_eq!(line[4], Pos::new(3, 4));
        assert!(state.try_place_stone(Pos::new(12, 12)).is_err());
    }

    #[test]
    fn test_undo_one_ply_in_pvp() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.try_place_stone(Pos::new(7, 8)).unwrap();
        state.undo();
        assert_eq!(state.move_history, vec![(Pos::new(7, 7), Stone::Black)]);
        assert_eq!(state.current_turn, Stone::White);
        assert!(state.board.is_empty(Pos::new(7, 8)));
    }

    #[test]
    fn test_undo_two_plies_in_pve() {
        let mut state = GameState::new(GameMode::PvE, fast_config());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        assert!(state.is_ai_turn());
        // Engine reply applied directly
        state.execute_move(Pos::new(6, 6)).unwrap();
        assert!(state.is_human_turn());

        state.undo();
        assert!(state.move_history.is_empty());
        assert!(state.board.is_board_empty());
        assert_eq!(state.current_turn, Stone::Black);
    }

    #[test]
    fn test_undo_clears_game_over() {
        let mut state = pvp();
        for i in 0..4 {
            state.try_place_stone(Pos::new(0, i)).unwrap();
            state.try_place_stone(Pos::new(1, i)).unwrap();
        }
        state.try_place_stone(Pos::new(0, 4)).unwrap();
        assert!(state.game_over.is_some());

        state.undo();
        assert!(state.game_over.is_none());
        assert_eq!(state.current_turn, Stone::Black);
    }

    #[test]
    fn test_mode_switch_restarts() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.set_mode(GameMode::PvE);
        assert!(state.board.is_board_empty());
        assert_eq!(state.mode, GameMode::PvE);
        assert_eq!(state.current_turn, Stone::Black);
    }

    #[test]
    fn test_ai_worker_replies() {
        let mut state = GameState::new(GameMode::PvE, fast_config());
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.start_ai_thinking();
        assert_eq!(state.ai_task(), Some(AiTask::Move));

        wait_for_worker(&mut state);
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.move_history[1].1, Stone::White);
        assert_eq!(state.current_turn, Stone::Black);
        assert!(state.move_timer.ai_thinking_time.is_some());
    }

    #[test]
    fn test_hint_runs_on_worker_and_does_not_move() {
        let mut state = pvp();
        state.try_place_stone(Pos::new(7, 7)).unwrap();
        state.request_suggestion();
        assert_eq!(state.ai_task(), Some(AiTask::Hint));
        assert!(state.try_place_stone(Pos::new(0, 0)).is_err());

        wait_for_worker(&mut state);
        let hint = state.suggested_move.unwrap();
        assert!(state.board.is_empty(hint));
        assert_eq!(state.move_history.len(), 1);
        assert_eq!(state.current_turn, Stone::White);
    }

    #[test]
    fn test_unscored_timed_out_reply_is_retried() {
        let mut state = GameState::new(GameMode::PvE, fast_config());
        state.try_place_stone(Pos::new(7, 7)).unwrap();

        let (tx, rx) = channel();
        tx.send(MoveResult {
            best_move: None,
            score: 0.0,
            search_type: SearchType::AlphaBeta,
            depth: 0,
            nodes: 1,
            time_ms: 0,
            completed: false,
        })
        .unwrap();
        state.ai_state = AiState::Thinking {
            task: AiTask::Move,
            receiver: rx,
            start_time: Instant::now(),
        };

        state.check_ai_result();
        assert_eq!(state.move_history.len(), 1);
        assert_eq!(state.ai_task(), Some(AiTask::Move));

        wait_for_worker(&mut state);
        assert_eq!(state.move_history.len(), 2);
        assert_eq!(state.move_history[1].1, Stone::White);
        let reply = state.last_ai_result.as_ref().unwrap();
        assert!(reply.completed);
        assert_eq!(reply.depth, 1);
    }

    #[test]
    fn test_pattern_census_tracks_board() {
        let mut state = pvp();
        for c in 5..8 {
            state.try_place_stone(Pos::new(7, c)).unwrap();
            state.try_place_stone(Pos::new(0, (c - 5) * 3)).unwrap();
        }
        let black = state.pattern_census(Stone::Black);
        assert!(black.open_three > 0);
        assert_eq!(black.five, 0);
        assert_eq!(state.pattern_census(Stone::White).open_three, 0);
    }

    #[test]
    fn test_clock_format() {
        assert_eq!(format_clock(Duration::from_secs(0)), "00:00");
        assert_eq!(format_clock(Duration::from_secs(75)), "01:15");
        assert_eq!(format_clock(Duration::from_secs(3600)), "60:00");
    }
}
