//! eframe application: menu bar, side panel and the board

use eframe::egui;
use egui::{Button, CentralPanel, Context, Key, RichText, SidePanel, TopBottomPanel};

use super::board_view::BoardScene;
use super::game_state::{format_clock, AiTask, GameMode, GameState};
use super::theme::PALETTE;
use crate::config::EngineConfig;
use crate::eval::PatternCounts;
use crate::Stone;

/// A user request, from the menu, the side panel or the keyboard.
/// Collected while drawing and applied once the frame is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NewGame,
    SetMode(GameMode),
    Undo,
    Hint,
    ToggleDetails,
}

const SHORTCUTS: [(Key, Action); 4] = [
    (Key::N, Action::NewGame),
    (Key::U, Action::Undo),
    (Key::H, Action::Hint),
    (Key::D, Action::ToggleDetails),
];

/// Shape rows of the details table, most severe first
fn census_rows(counts: &PatternCounts) -> [(&'static str, u32); 9] {
    [
        ("five", counts.five),
        ("open four", counts.open_four),
        ("double four", counts.double_four),
        ("blocked four", counts.blocked_four),
        ("double three", counts.double_three),
        ("open three", counts.open_three),
        ("blocked three", counts.blocked_three),
        ("open two", counts.open_two),
        ("blocked two", counts.blocked_two),
    ]
}

pub struct GomokuApp {
    state: GameState,
    show_details: bool,
    pending: Vec<Action>,
}

impl GomokuApp {
    /// Create the app for `mode`; `config` drives the engine
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EngineConfig, mode: GameMode) -> Self {
        Self {
            state: GameState::new(mode, config),
            show_details: true,
            pending: Vec::new(),
        }
    }

    fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "ui action");
        match action {
            Action::NewGame => self.state.reset(),
            Action::SetMode(mode) => self.state.set_mode(mode),
            Action::Undo => self.state.undo(),
            Action::Hint => {
                if self.state.mode == GameMode::PvP {
                    self.state.request_suggestion();
                }
            }
            Action::ToggleDetails => self.show_details = !self.show_details,
        }
    }

    fn menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    let items = [
                        ("New game", "N", Action::NewGame),
                        ("Undo", "U", Action::Undo),
                        ("Hint (two players)", "H", Action::Hint),
                    ];
                    for (label, key, action) in items {
                        if ui.add(Button::new(label).shortcut_text(key)).clicked() {
                            self.pending.push(action);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Mode", |ui| {
                    for mode in [GameMode::PvE, GameMode::PvP] {
                        if ui.radio(self.state.mode == mode, mode.label()).clicked() {
                            self.pending.push(Action::SetMode(mode));
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.show_details, "Engine details (D)").clicked() {
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn side_panel(&mut self, ctx: &Context) {
        SidePanel::right("side")
            .resizable(false)
            .exact_width(250.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Gomoku");
                ui.weak(self.mode_line());
                ui.separator();
                self.status(ui);
                ui.separator();
                self.clocks(ui);
                ui.separator();
                self.controls(ui);
                if self.show_details {
                    ui.separator();
                    self.engine_details(ui);
                }
            });
    }

    fn mode_line(&self) -> String {
        match self.state.mode {
            GameMode::PvE => format!(
                "You play {} against the engine",
                self.state.engine_color().opponent().name()
            ),
            GameMode::PvP => "Two players, one board".to_string(),
        }
    }

    fn status(&self, ui: &mut egui::Ui) {
        let state = &self.state;
        if let Some(result) = state.game_over {
            let headline = match result.winner {
                Stone::Empty => "Draw, the board is full".to_string(),
                winner => format!("{} wins", winner.name()),
            };
            ui.label(RichText::new(headline).size(18.0).strong().color(PALETTE.winning));
            ui.label(format!(
                "{} moves in {}",
                state.move_history.len(),
                format_clock(state.move_timer.game_elapsed())
            ));
        } else {
            ui.horizontal(|ui| match state.ai_task() {
                Some(task) => {
                    ui.spinner();
                    ui.label(match task {
                        AiTask::Move => "Engine thinking...",
                        AiTask::Hint => "Looking for a hint...",
                    });
                }
                None => {
                    let turn = format!("{} to move", state.current_turn.name());
                    ui.label(RichText::new(turn).size(16.0).strong());
                    if state.mode == GameMode::PvE && state.is_human_turn() {
                        ui.weak("(you)");
                    }
                }
            });
        }

        if let Some(message) = &state.message {
            ui.colored_label(PALETTE.warning, message.as_str());
        }
    }

    fn clocks(&self, ui: &mut egui::Ui) {
        let timer = &self.state.move_timer;
        egui::Grid::new("clocks").num_columns(2).show(ui, |ui| {
            ui.label("Game");
            ui.monospace(format_clock(timer.game_elapsed()));
            ui.end_row();

            if self.state.game_over.is_none() {
                ui.label("This turn");
                ui.monospace(format!("{:.1}s", timer.turn_elapsed().as_secs_f32()));
                ui.end_row();
            }
            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label("Thinking");
                ui.monospace(format!("{:.2}s", elapsed.as_secs_f32()));
                ui.end_row();
            }
            if let Some(last) = timer.ai_thinking_time {
                ui.label("Last engine move");
                ui.monospace(format!("{:.3}s", last.as_secs_f32()));
                ui.end_row();
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_ai_thinking();
        let running = self.state.game_over.is_none();
        ui.horizontal(|ui| {
            let can_undo = !busy && !self.state.move_history.is_empty();
            if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                self.pending.push(Action::Undo);
            }
            if ui.button("Restart").clicked() {
                self.pending.push(Action::NewGame);
            }
            if self.state.mode == GameMode::PvP
                && ui.add_enabled(!busy && running, Button::new("Hint")).clicked()
            {
                self.pending.push(Action::Hint);
            }
        });
        ui.weak(format!("Move {}", self.state.move_history.len()));
    }

    fn engine_details(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Last search").strong());
        match &self.state.last_ai_result {
            Some(result) => {
                egui::Grid::new("search").num_columns(2).show(ui, |ui| {
                    let best = result.best_move.map_or_else(|| "none".to_string(), |pos| pos.to_string());
                    let depth = if result.completed {
                        result.depth.to_string()
                    } else {
                        format!("{} (partial)", result.depth)
                    };
                    let rows = [
                        ("Move", best),
                        ("Kind", format!("{:?}", result.search_type)),
                        ("Score", format!("{:.1}", result.score)),
                        ("Depth", depth),
                        ("Nodes", result.nodes.to_string()),
                        ("Time", format!("{} ms", result.time_ms)),
                    ];
                    for (name, value) in rows {
                        ui.label(name);
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
            }
            None => {
                ui.weak("No search yet");
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Shapes on the board").strong());
        let black = census_rows(&self.state.pattern_census(Stone::Black));
        let white = census_rows(&self.state.pattern_census(Stone::White));
        egui::Grid::new("census").num_columns(3).striped(true).show(ui, |ui| {
            ui.weak("");
            ui.weak("Black");
            ui.weak("White");
            ui.end_row();
            for ((name, b), (_, w)) in black.into_iter().zip(white) {
                ui.label(name);
                ui.monospace(b.to_string());
                ui.monospace(w.to_string());
                ui.end_row();
            }
        });
    }

    fn board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let scene = BoardScene {
                board: &state.board,
                to_move: state.current_turn,
                last_move: state.last_move,
                hint: state.suggested_move,
                winning_line: state.game_over.and_then(|result| result.winning_line),
                interactive: state.game_over.is_none() && state.is_human_turn() && !state.is_ai_thinking(),
            };
            if let Some(pos) = scene.show(ui) {
                if let Err(message) = self.state.try_place_stone(pos) {
                    self.state.message = Some(message);
                }
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        ctx.input(|input| {
            for (key, action) in SHORTCUTS {
                if input.key_pressed(key) {
                    self.pending.push(action);
                }
            }
        });

        self.state.check_ai_result();
        self.state.start_ai_thinking();

        self.menu_bar(ctx);
        self.side_panel(ctx);
        self.board(ctx);

        for action in std::mem::take(&mut self.pending) {
            self.apply(action);
        }

        // Clocks tick and the worker is polled every frame
        if self.state.game_over.is_none() || self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
