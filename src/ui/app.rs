//! Main application for the Gomoku GUI

use std::path::PathBuf;

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::{BoardView, Overlay};
use super::game_state::{GameMode, GameResult, GameState, GuiSettings};
use super::theme::*;
use crate::console::format_coord;
use crate::record::{list_records, GameRecord, RECORDS_DIR};
use crate::Stone;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    record_files: Vec<PathBuf>,
}

impl GomokuApp {
    /// Create the app; with a record it opens in replay mode
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: GuiSettings,
        record: Option<GameRecord>,
    ) -> Self {
        let mut app = Self {
            state: GameState::new(GameMode::default(), settings),
            board_view: BoardView::default(),
            show_debug: true,
            record_files: Vec::new(),
        };
        if let Some(record) = record {
            app.open_record(record);
        }
        app.refresh_records();
        app
    }

    fn new_game(&mut self, mode: GameMode) {
        self.state = GameState::new(mode, self.state.settings().clone());
    }

    fn open_record(&mut self, record: GameRecord) {
        match GameState::from_record(record, self.state.settings().clone()) {
            Ok(state) => self.state = state,
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    fn load_record_file(&mut self, path: &PathBuf) {
        match GameRecord::load(path) {
            Ok(record) => self.open_record(record),
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    fn refresh_records(&mut self) {
        match list_records(RECORDS_DIR) {
            Ok(files) => self.record_files = files,
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    fn save_record(&mut self) {
        match self.state.save_record() {
            Ok(_) => self.refresh_records(),
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - Black)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_color: Stone::Black,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - White)").clicked() {
                        self.new_game(GameMode::PvE {
                            human_color: Stone::White,
                        });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP {
                            show_suggestions: false,
                        });
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    if ui.button("Save Record").clicked() {
                        self.save_record();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Replay", |ui| {
                    if ui.button("Refresh").clicked() {
                        self.refresh_records();
                    }
                    ui.separator();
                    if self.record_files.is_empty() {
                        ui.label(format!("No records in {RECORDS_DIR}/"));
                    }
                    let mut chosen = None;
                    for path in &self.record_files {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        if ui.button(name).clicked() {
                            chosen = Some(path.clone());
                        }
                    }
                    if let Some(path) = chosen {
                        self.load_record_file(&path);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    if let GameMode::PvP { show_suggestions } = &mut self.state.mode {
                        ui.checkbox(show_suggestions, "Auto Hints");
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human_color } => {
                            format!("PvE - You: {}", human_color.name())
                        }
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                        GameMode::Replay => "Replay".to_string(),
                    };
                    let size = self.state.board.size();
                    ui.label(format!("{mode_text}  |  {size}x{size}"));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                if self.state.mode == GameMode::Replay {
                    self.render_replay_card(ui);
                } else {
                    self.render_timer_card(ui);
                    ui.add_space(10.0);
                    self.render_actions_card(ui);
                }

                if self.show_debug && self.state.mode != GameMode::Replay {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over.clone() {
                    ui.add_space(10.0);
                    if self.render_game_over_card(ui, &result) {
                        self.state.reset();
                    }
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Clickable label styled as a button
    fn button(ui: &mut egui::Ui, text: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                        .sense(egui::Sense::click()),
                )
                .clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("five in a row").size(11.0).color(TEXT_MUTED));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();
            let is_black = turn == Stone::Black;
            let (stone_char, accent, glyph) = if is_black {
                ("●", SWATCH_BLACK, TEXT_PRIMARY)
            } else {
                ("○", SWATCH_WHITE, egui::Color32::from_rgb(30, 30, 35))
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    stone_char,
                    egui::FontId::proportional(28.0),
                    glyph,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(turn.name().to_uppercase())
                            .size(18.0)
                            .strong()
                            .color(TEXT_PRIMARY),
                    );

                    let status = if self.state.mode == GameMode::Replay {
                        ("Replaying", TEXT_SECONDARY)
                    } else if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.3 {
                    TIMER_NORMAL
                } else if secs < 0.5 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::button(ui, "Undo") {
                    self.state.undo();
                }
                ui.add_space(4.0);
                if let GameMode::PvP { .. } = self.state.mode {
                    if Self::button(ui, "Hint") {
                        self.state.request_suggestion();
                    }
                    ui.add_space(4.0);
                }
                if Self::button(ui, "Save") {
                    self.save_record();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_replay_card(&mut self, ui: &mut egui::Ui) {
        let Some(replay) = self.state.replay() else {
            return;
        };
        let (position, total) = (replay.position(), replay.total_moves());
        let last = replay
            .position()
            .checked_sub(1)
            .and_then(|i| replay.record().moves.get(i))
            .map(|m| format_coord(m.pos()));

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("REPLAY").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::button(ui, "|<") {
                    self.state.replay_seek(0);
                }
                if Self::button(ui, "<") {
                    self.state.replay_step_back();
                }
                if Self::button(ui, ">") {
                    self.state.replay_step_forward();
                }
                if Self::button(ui, ">|") {
                    self.state.replay_seek(total);
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move {position} / {total}"))
                    .size(14.0)
                    .color(TEXT_PRIMARY),
            );
            if let Some(coord) = last {
                ui.label(RichText::new(format!("Last: {coord}")).size(11.0).color(TEXT_SECONDARY));
            }
        });
    }

    /// Selection diagnostics from the last engine call
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(
                            RichText::new(format!("Score: {}", result.score))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{}ms", result.time_ms))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                            ui.label(
                                RichText::new(format!("{} nodes", result.nodes))
                                    .size(10.0)
                                    .color(TEXT_MUTED),
                            );
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("-> {}", format_coord(pos)))
                            .size(12.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                }
            });
    }

    /// Returns `true` when "New Game" was clicked
    fn render_game_over_card(&self, ui: &mut egui::Ui, result: &GameResult) -> bool {
        let (headline, symbol, accent) = match result.winner {
            Some(Stone::Black) => ("BLACK WINS!", "●", SWATCH_BLACK),
            Some(Stone::White) => ("WHITE WINS!", "○", SWATCH_WHITE),
            _ => ("DRAW", "·", TEXT_SECONDARY),
        };
        let button_text = if self.state.mode == GameMode::Replay {
            "Restart"
        } else {
            "New Game"
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.add_space(ui.available_width() / 2.0 - 70.0);
                        ui.label(RichText::new(symbol).size(32.0).color(accent));
                        ui.add_space(8.0);
                        ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    });
                    if result.winning_line.is_some() {
                        ui.add_space(4.0);
                        ui.label(RichText::new("by 5-in-a-row").size(11.0).color(TEXT_SECONDARY));
                    }
                    ui.add_space(12.0);
                    Self::button(ui, button_text)
                })
                .inner
            })
            .inner
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_line = self
                .state
                .game_over
                .as_ref()
                .and_then(|r| r.winning_line.clone());
            let interactive = self.state.game_over.is_none()
                && self.state.is_human_turn()
                && !self.state.is_ai_thinking();

            let overlay = Overlay {
                suggested_move: self.state.suggested_move,
                winning_line: winning_line.as_deref(),
                interactive,
            };
            let clicked = self.board_view.show(ui, &self.state.board, overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, hint, undo, new_game, back, forward) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::H),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if hint {
            if let GameMode::PvP { .. } = self.state.mode {
                self.state.request_suggestion();
            }
        }
        if undo || (back && self.state.mode == GameMode::Replay) {
            self.state.undo();
        }
        if forward && self.state.mode == GameMode::Replay {
            self.state.replay_step_forward();
        }
        if new_game {
            self.state.reset();
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        // Auto hints for the side to move
        if let GameMode::PvP {
            show_suggestions: true,
        } = self.state.mode
        {
            if self.state.suggested_move.is_none() && self.state.game_over.is_none() {
                self.state.request_suggestion();
            }
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
