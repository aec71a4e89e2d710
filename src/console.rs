//! Text-mode game against the engine, or between two people at one terminal
//!
//! Columns are lettered from `A`, rows numbered from 1, matching the board's
//! `Display` output.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::AIEngine;
use crate::record::{GameRecorder, RecordError};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Settings for a console game
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub board_size: usize,
    /// Color the human plays; Black always moves first
    pub human: Stone,
    /// Both colors are entered at the prompt; no engine
    pub pvp: bool,
    pub seed: Option<u64>,
    /// Save the record under `records/` when the game ends
    pub save_record: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            board_size: crate::board::DEFAULT_BOARD_SIZE,
            human: Stone::Black,
            pvp: false,
            seed: None,
            save_record: false,
        }
    }
}

/// How a console game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutcome {
    Won(Stone),
    Draw,
    Quit,
}

/// Parse `H8` (column letter, 1-based row) or `8 8` (1-based row and column).
pub fn parse_coord(input: &str, size: usize) -> Option<Pos> {
    let s = input.trim();
    let first = s.chars().next()?;

    let (row, col) = if first.is_ascii_alphabetic() {
        let col = (first.to_ascii_uppercase() as u8 - b'A') as usize;
        let row: usize = s[1..].trim().parse().ok()?;
        (row.checked_sub(1)?, col)
    } else {
        let mut parts = s.split_whitespace();
        let row: usize = parts.next()?.parse().ok()?;
        let col: usize = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        (row.checked_sub(1)?, col.checked_sub(1)?)
    };

    (row < size && col < size).then(|| Pos::new(row as u8, col as u8))
}

/// Inverse of the letter form of [`parse_coord`]
pub fn format_coord(pos: Pos) -> String {
    format!("{}{}", (b'A' + pos.col) as char, pos.row + 1)
}

/// Play on stdin/stdout
pub fn run_human_vs_ai(
    config: EngineConfig,
    opts: &ConsoleOptions,
) -> Result<ConsoleOutcome, ConsoleError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(stdin.lock(), stdout.lock(), config, opts)
}

/// Two people taking turns on stdin/stdout
pub fn run_human_vs_human(opts: &ConsoleOptions) -> Result<ConsoleOutcome, ConsoleError> {
    let opts = ConsoleOptions {
        pvp: true,
        ..opts.clone()
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(stdin.lock(), stdout.lock(), EngineConfig::default(), &opts)
}

/// Game loop over arbitrary streams
pub fn play<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    config: EngineConfig,
    opts: &ConsoleOptions,
) -> Result<ConsoleOutcome, ConsoleError> {
    let mut engine = (!opts.pvp).then(|| match opts.seed {
        Some(seed) => AIEngine::with_seed(config, seed),
        None => AIEngine::with_config(config),
    });
    let mut board = Board::new(opts.board_size);
    let mut recorder = GameRecorder::new(opts.board_size, Stone::Black);
    let human = opts.human;

    if opts.pvp {
        writeln!(
            out,
            "{} ({}) against {} ({}).",
            Stone::Black.name(),
            symbol(Stone::Black),
            Stone::White.name(),
            symbol(Stone::White)
        )?;
    } else {
        writeln!(
            out,
            "You play {} ({}), the engine plays {}.",
            human.name(),
            symbol(human),
            human.opponent().name()
        )?;
    }
    writeln!(out, "Enter moves as H8 or \"8 8\"; q quits.")?;
    writeln!(out, "\n{board}\n")?;

    let outcome = loop {
        let mover = board.current_player();
        let pos = match &mut engine {
            Some(engine) if mover != human => {
                match engine.get_move_with_stats(&mut board).best_move {
                    Some(pos) => {
                        writeln!(out, "Engine plays {}", format_coord(pos))?;
                        pos
                    }
                    None => break ConsoleOutcome::Draw,
                }
            }
            _ => match read_move(&mut input, &mut out, &board)? {
                Some(pos) => pos,
                None => break ConsoleOutcome::Quit,
            },
        };

        if !board.place_stone(pos.row as usize, pos.col as usize) {
            continue;
        }
        recorder.add_move(mover, pos);
        writeln!(out, "\n{board}\n")?;

        if let Some(winner) = board.check_winner(Some(pos)) {
            break ConsoleOutcome::Won(winner);
        }
        if board.is_full() {
            break ConsoleOutcome::Draw;
        }
    };

    match outcome {
        ConsoleOutcome::Won(w) if w == human && !opts.pvp => writeln!(out, "You win!")?,
        ConsoleOutcome::Won(w) => writeln!(out, "{} wins.", w.name())?,
        ConsoleOutcome::Draw => writeln!(out, "Draw.")?,
        ConsoleOutcome::Quit => writeln!(out, "Game abandoned.")?,
    }

    if let ConsoleOutcome::Won(w) = outcome {
        recorder.set_winner(Some(w));
    }
    if opts.save_record && !recorder.moves().is_empty() {
        let prefix = if opts.pvp { "human_vs_human" } else { "human_vs_ai" };
        let path: PathBuf = recorder.save_to_default(prefix)?;
        writeln!(out, "Record saved to {}", path.display())?;
    }
    Ok(outcome)
}

/// Prompt until a legal cell is entered; `None` on quit or end of input.
fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    board: &Board,
) -> io::Result<Option<Pos>> {
    let mut line = String::new();
    loop {
        write!(out, "{} to move> ", board.current_player().name())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let text = line.trim();
        if matches!(text.to_ascii_lowercase().as_str(), "q" | "quit" | "exit") {
            return Ok(None);
        }

        match parse_coord(text, board.size()) {
            None => writeln!(out, "Could not read {text:?}; try H8 or \"8 8\".")?,
            Some(pos) if !board.is_empty(pos) => {
                writeln!(out, "{} is taken.", format_coord(pos))?
            }
            Some(pos) => return Ok(Some(pos)),
        }
    }
}

fn symbol(stone: Stone) -> char {
    match stone {
        Stone::Black => '●',
        Stone::White => '○',
        Stone::Empty => '.',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str, opts: &ConsoleOptions) -> (ConsoleOutcome, String) {
        let mut out = Vec::new();
        let outcome = play(script.as_bytes(), &mut out, EngineConfig::default(), opts).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn seeded() -> ConsoleOptions {
        ConsoleOptions {
            seed: Some(7),
            ..ConsoleOptions::default()
        }
    }

    #[test]
    fn test_parse_letter_form() {
        assert_eq!(parse_coord("H8", 15), Some(Pos::new(7, 7)));
        assert_eq!(parse_coord("a1", 15), Some(Pos::new(0, 0)));
        assert_eq!(parse_coord(" O15 ", 15), Some(Pos::new(14, 14)));
        assert_eq!(parse_coord("P1", 15), None);
        assert_eq!(parse_coord("A0", 15), None);
        assert_eq!(parse_coord("A16", 15), None);
        assert_eq!(parse_coord("H", 15), None);
    }

    #[test]
    fn test_parse_numeric_form() {
        assert_eq!(parse_coord("8 8", 15), Some(Pos::new(7, 7)));
        assert_eq!(parse_coord("1   15", 15), Some(Pos::new(0, 14)));
        assert_eq!(parse_coord("0 3", 15), None);
        assert_eq!(parse_coord("16 1", 15), None);
        assert_eq!(parse_coord("8", 15), None);
        assert_eq!(parse_coord("8 8 8", 15), None);
        assert_eq!(parse_coord("", 15), None);
        assert_eq!(parse_coord("-1 2", 15), None);
    }

    #[test]
    fn test_format_roundtrip() {
        for pos in [Pos::new(0, 0), Pos::new(7, 7), Pos::new(14, 3)] {
            assert_eq!(parse_coord(&format_coord(pos), 15), Some(pos));
        }
        assert_eq!(format_coord(Pos::new(7, 7)), "H8");
    }

    #[test]
    fn test_quit_immediately() {
        let (outcome, text) = run_script("q\n", &seeded());
        assert_eq!(outcome, ConsoleOutcome::Quit);
        assert!(text.contains("Game abandoned."));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (outcome, _) = run_script("", &seeded());
        assert_eq!(outcome, ConsoleOutcome::Quit);
    }

    #[test]
    fn test_rejects_bad_and_taken_cells() {
        let (outcome, text) = run_script("zz\nH8\nH8\nq\n", &seeded());
        assert_eq!(outcome, ConsoleOutcome::Quit);
        assert!(text.contains("Could not read \"zz\""));
        assert!(text.contains("Engine plays"));
        assert!(text.contains("H8 is taken."));
    }

    #[test]
    fn test_engine_opens_when_human_is_white() {
        let opts = ConsoleOptions {
            human: Stone::White,
            ..seeded()
        };
        let (_, text) = run_script("q\n", &opts);
        assert!(text.contains("Engine plays H8"));
    }

    #[test]
    fn test_two_players_to_five() {
        let opts = ConsoleOptions {
            pvp: true,
            ..ConsoleOptions::default()
        };
        let (outcome, text) = run_script("H8\nA1\nI8\nA2\nJ8\nA3\nK8\nA4\nL8\n", &opts);
        assert_eq!(outcome, ConsoleOutcome::Won(Stone::Black));
        assert!(text.contains("Black wins."));
        assert!(!text.contains("Engine plays"));
        assert!(text.contains("White to move>"));
    }

    #[test]
    fn test_two_players_share_taken_check() {
        let opts = ConsoleOptions {
            pvp: true,
            ..ConsoleOptions::default()
        };
        let (outcome, text) = run_script("H8\nH8\n8 9\nq\n", &opts);
        assert_eq!(outcome, ConsoleOutcome::Quit);
        assert!(text.contains("H8 is taken."));
        assert!(text.contains("Black to move>"));
    }
}
