//! GUI module for the Gomoku game
//!
//! Native GUI on egui/eframe: play against the engine, hotseat with hints,
//! or step through saved records.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::GomokuApp;
pub use game_state::{GameMode, GameResult, GameState, GuiSettings};
