//! Engine-versus-engine games
//!
//! Pits the heuristic engine against itself or against a uniformly random
//! player and tallies results. Progress goes to stderr.

use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
use crate::config::EngineConfig;
use crate::engine::AIEngine;
use crate::record::{GameRecord, GameRecorder, RecordError, RECORDS_DIR};

/// Which policy plays a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Heuristic,
    Random,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayerKind::Heuristic => "heuristic",
            PlayerKind::Random => "random",
        })
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heuristic" | "h" => Ok(PlayerKind::Heuristic),
            "random" | "r" => Ok(PlayerKind::Random),
            other => Err(format!("unknown player kind '{other}' (heuristic|random)")),
        }
    }
}

/// Configuration for a series of self-play games.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub black: PlayerKind,
    pub white: PlayerKind,
    pub board_size: usize,
    pub engine: EngineConfig,
    /// Series seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Save each game under `records/`
    pub save_records: bool,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            black: PlayerKind::Heuristic,
            white: PlayerKind::Heuristic,
            board_size: DEFAULT_BOARD_SIZE,
            engine: EngineConfig::default(),
            seed: None,
            save_records: false,
            quiet: false,
        }
    }
}

/// Result of one game
#[derive(Debug, Clone)]
pub struct GameOutcome {
    /// `None` for a draw
    pub winner: Option<Stone>,
    pub move_count: usize,
    pub record: GameRecord,
}

/// Totals over a series
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl SeriesSummary {
    pub fn add(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.total_moves += outcome.move_count;
        match outcome.winner {
            Some(Stone::Black) => self.black_wins += 1,
            Some(Stone::White) => self.white_wins += 1,
            _ => self.draws += 1,
        }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }

    pub fn print_summary(&self) {
        eprintln!("=== Self-Play Summary ===");
        eprintln!("Games: {}", self.games);
        eprintln!("Black wins: {}", self.black_wins);
        eprintln!("White wins: {}", self.white_wins);
        eprintln!("Draws: {}", self.draws);
        eprintln!("Average moves: {:.1}", self.avg_moves());
    }
}

enum Player {
    Heuristic(AIEngine),
    Random,
}

impl Player {
    fn new(kind: PlayerKind, config: &EngineConfig, rng: &mut SmallRng) -> Self {
        match kind {
            PlayerKind::Heuristic => {
                let engine_rng = SmallRng::seed_from_u64(rng.gen());
                Player::Heuristic(AIEngine::with_rng(config.clone(), engine_rng))
            }
            PlayerKind::Random => Player::Random,
        }
    }

    fn select(&mut self, board: &mut Board, rng: &mut SmallRng) -> Option<Pos> {
        match self {
            Player::Heuristic(engine) => engine.select_move(board),
            Player::Random => random_move(board, rng),
        }
    }
}

/// Uniform choice among empty cells
pub fn random_move(board: &Board, rng: &mut SmallRng) -> Option<Pos> {
    let size = board.size();
    let empties: Vec<Pos> = board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &stone)| stone == Stone::Empty)
        .map(|(i, _)| Pos::from_index(i, size))
        .collect();
    empties.choose(rng).copied()
}

/// Play one game to a win, a full board, or a player with no move.
pub fn play_single_game(
    black: PlayerKind,
    white: PlayerKind,
    config: &SelfPlayConfig,
    rng: &mut SmallRng,
) -> GameOutcome {
    let mut board = Board::new(config.board_size);
    let mut recorder = GameRecorder::new(config.board_size, Stone::Black);
    let mut black_player = Player::new(black, &config.engine, rng);
    let mut white_player = Player::new(white, &config.engine, rng);

    let winner = loop {
        let mover = board.current_player();
        let player = match mover {
            Stone::White => &mut white_player,
            _ => &mut black_player,
        };
        let Some(pos) = player.select(&mut board, rng) else {
            break None;
        };
        if !board.place_stone(pos.row as usize, pos.col as usize) {
            break None;
        }
        recorder.add_move(mover, pos);

        if let Some(w) = board.check_winner(Some(pos)) {
            break Some(w);
        }
        if board.is_full() {
            break None;
        }
    };

    recorder.set_winner(winner);
    GameOutcome {
        winner,
        move_count: board.move_count(),
        record: recorder.to_record(),
    }
}

fn series_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Run `config.num_games` games, saving records if asked.
pub fn run_series(config: &SelfPlayConfig) -> Result<SeriesSummary, RecordError> {
    let mut rng = series_rng(config.seed);
    let prefix = format!("{}_vs_{}", config.black, config.white);
    let mut summary = SeriesSummary::default();

    for i in 1..=config.num_games {
        let outcome = play_single_game(config.black, config.white, config, &mut rng);
        summary.add(&outcome);

        if !config.quiet {
            let result = outcome.winner.map_or("draw", Stone::name);
            eprintln!(
                "Game {}/{}: {} in {} moves",
                i, config.num_games, result, outcome.move_count
            );
        }
        if config.save_records {
            let path = outcome.record.save_in(RECORDS_DIR, &prefix)?;
            if !config.quiet {
                eprintln!("  saved {}", path.display());
            }
        }
    }

    Ok(summary)
}
