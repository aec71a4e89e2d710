//! Game records
//!
//! A finished (or abandoned) game is stored as pretty-printed JSON: board
//! size, who moved first, the winner and every move with its color. Player
//! colors use [`Stone::code`] (1 = Black, 2 = White). Timestamps are local
//! ISO-8601 strings to the second (`2025-11-25T14:30:12`); records written
//! with integer Unix seconds still load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use crate::board::{Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Directory, relative to the working directory, for saved records
pub const RECORDS_DIR: &str = "records";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors that can occur reading, writing or replaying a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported board size {0}")]
    BoardSize(usize),

    #[error("move {index}: invalid player code {code}")]
    BadPlayer { index: usize, code: u8 },

    #[error("move {index}: ({row}, {col}) is off the board or occupied")]
    IllegalMove { index: usize, row: u8, col: u8 },
}

/// One placed stone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based move number
    pub index: usize,
    pub player: u8,
    pub row: u8,
    pub col: u8,
    #[serde(default, deserialize_with = "timestamp")]
    pub played_at: String,
}

impl MoveRecord {
    #[inline]
    pub fn pos(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    pub fn stone(&self) -> Result<Stone, RecordError> {
        match Stone::from_code(self.player) {
            Some(stone) if stone != Stone::Empty => Ok(stone),
            _ => Err(RecordError::BadPlayer {
                index: self.index,
                code: self.player,
            }),
        }
    }
}

/// A whole game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub board_size: usize,
    pub first_player: u8,
    /// `None` for a draw or an unfinished game
    pub winner: Option<u8>,
    pub moves: Vec<MoveRecord>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: String,
}

impl GameRecord {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record: GameRecord =
            serde_json::from_str(&text).map_err(|source| RecordError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&record.board_size) {
            return Err(RecordError::BoardSize(record.board_size));
        }
        Ok(record)
    }

    /// Write as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
        let path = path.as_ref();
        let io_err = |source| RecordError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| RecordError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        Ok(path.to_path_buf())
    }

    /// Save under `dir` as `<prefix>_<YYYYmmdd_HHMMSS>.json`, never overwriting.
    pub fn save_in(&self, dir: impl AsRef<Path>, prefix: &str) -> Result<PathBuf, RecordError> {
        let dir = dir.as_ref();
        let stamp = Local::now().format(FILE_STAMP_FORMAT);
        let mut path = dir.join(format!("{prefix}_{stamp}.json"));
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("{prefix}_{stamp}_{n}.json"));
            n += 1;
        }
        self.save(path)
    }

    pub fn first_stone(&self) -> Stone {
        match Stone::from_code(self.first_player) {
            Some(Stone::White) => Stone::White,
            _ => Stone::Black,
        }
    }

    pub fn winner_stone(&self) -> Option<Stone> {
        self.winner
            .and_then(Stone::from_code)
            .filter(|&s| s != Stone::Empty)
    }
}

/// Accumulates moves while a game is played
#[derive(Debug, Clone)]
pub struct GameRecorder {
    board_size: usize,
    first_player: Stone,
    moves: Vec<MoveRecord>,
    winner: Option<Stone>,
    created_at: String,
}

impl GameRecorder {
    pub fn new(board_size: usize, first_player: Stone) -> Self {
        Self {
            board_size,
            first_player,
            moves: Vec::new(),
            winner: None,
            created_at: now(),
        }
    }

    pub fn add_move(&mut self, player: Stone, pos: Pos) {
        self.moves.push(MoveRecord {
            index: self.moves.len() + 1,
            player: player.code(),
            row: pos.row,
            col: pos.col,
            played_at: now(),
        });
    }

    /// Drop the most recent move (undo)
    pub fn pop_move(&mut self) -> Option<MoveRecord> {
        self.winner = None;
        self.moves.pop()
    }

    pub fn set_winner(&mut self, winner: Option<Stone>) {
        self.winner = winner;
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            board_size: self.board_size,
            first_player: self.first_player.code(),
            winner: self.winner.map(Stone::code),
            moves: self.moves.clone(),
            created_at: self.created_at.clone(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
        self.to_record().save(path)
    }

    pub fn save_in(&self, dir: impl AsRef<Path>, prefix: &str) -> Result<PathBuf, RecordError> {
        self.to_record().save_in(dir, prefix)
    }

    /// Save into [`RECORDS_DIR`] under the working directory
    pub fn save_to_default(&self, prefix: &str) -> Result<PathBuf, RecordError> {
        self.save_in(RECORDS_DIR, prefix)
    }
}

/// Record files (`*.json`) in `dir`, sorted by name. A missing directory
/// yields an empty list.
pub fn list_records(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, RecordError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let io_err = |source| RecordError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts the ISO string form, or integer Unix seconds from older files.
fn timestamp<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stamp {
        Text(String),
        Unix(i64),
        Missing(()),
    }

    Ok(match Stamp::deserialize(deserializer)? {
        Stamp::Text(text) => text,
        Stamp::Unix(secs) => DateTime::from_timestamp(secs, 0)
            .map(|t| t.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
        Stamp::Missing(()) => String::new(),
    })
}
