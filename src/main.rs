//! Gomoku front end
//!
//! Launches the GUI by default; `console`, `replay` and `selfplay`
//! subcommands run without a window.

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gomoku::console::{run_human_vs_ai, run_human_vs_human, ConsoleOptions};
use gomoku::record::GameRecord;
use gomoku::selfplay::{run_series, PlayerKind, SelfPlayConfig};
use gomoku::ui::{GomokuApp, GuiSettings};
use gomoku::{EngineConfig, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Options shared by every mode
#[derive(Args, Clone)]
struct CommonArgs {
    /// Board side length
    #[arg(short, long, global = true, default_value_t = DEFAULT_BOARD_SIZE, value_parser = parse_board_size)]
    size: usize,

    /// Candidate radius around existing stones
    #[arg(short, long, global = true)]
    radius: Option<usize>,

    /// Largest candidate count searched two plies deep (0 disables lookahead)
    #[arg(short = 'm', long, global = true)]
    max_candidates: Option<usize>,

    /// Seed for reproducible engine play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Engine config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Windowed game (default)
    Gui,
    /// Play the engine, or another person, in the terminal
    Console {
        /// Play White instead of Black
        #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "pvp")]
        white: bool,
        /// Two people take turns; no engine
        #[arg(long, action = clap::ArgAction::SetTrue)]
        pvp: bool,
        /// Save the record under records/ when the game ends
        #[arg(long, action = clap::ArgAction::SetTrue)]
        save: bool,
    },
    /// Open a saved record in the replay viewer
    Replay { file: PathBuf },
    /// Engine-versus-engine series
    Selfplay {
        #[arg(short, long, default_value_t = 10)]
        games: usize,
        #[arg(long, default_value_t = PlayerKind::Heuristic)]
        black: PlayerKind,
        #[arg(long, default_value_t = PlayerKind::Heuristic)]
        white: PlayerKind,
        /// Save each game under records/
        #[arg(long, action = clap::ArgAction::SetTrue)]
        save: bool,
        #[arg(short, long, action = clap::ArgAction::SetTrue)]
        quiet: bool,
    },
}

fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("board size must be {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"))
    }
}

impl CommonArgs {
    /// File config (or defaults) with flag overrides applied
    fn engine_config(&self) -> Result<EngineConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(radius) = self.radius {
            config.search_radius = radius;
        }
        if let Some(max) = self.max_candidates {
            config.max_search_candidates = max;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run_gui(settings: GuiSettings, record: Option<GameRecord>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, settings, record)))),
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = cli.common.engine_config()?;
    let settings = GuiSettings {
        board_size: cli.common.size,
        config: config.clone(),
        seed: cli.common.seed,
    };

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(settings, None)?,
        Command::Replay { file } => {
            let record = GameRecord::load(&file)?;
            eprintln!(
                "Loaded {} ({} moves, {}x{})",
                file.display(),
                record.moves.len(),
                record.board_size,
                record.board_size
            );
            run_gui(settings, Some(record))?;
        }
        Command::Console { white, pvp, save } => {
            let opts = ConsoleOptions {
                board_size: cli.common.size,
                human: if white { Stone::White } else { Stone::Black },
                pvp,
                seed: cli.common.seed,
                save_record: save,
            };
            if pvp {
                run_human_vs_human(&opts)?;
            } else {
                run_human_vs_ai(config, &opts)?;
            }
        }
        Command::Selfplay {
            games,
            black,
            white,
            save,
            quiet,
        } => {
            let series = SelfPlayConfig {
                num_games: games,
                black,
                white,
                board_size: cli.common.size,
                engine: config,
                seed: cli.common.seed,
                save_records: save,
                quiet,
            };
            eprintln!(
                "Self-play: {} {} vs {} on {}x{}",
                games, black, white, series.board_size, series.board_size
            );
            run_series(&series)?.print_summary();
        }
    }

    Ok(())
}
