//! Freestyle Gomoku with a heuristic opponent
//!
//! Two players alternate placing stones on a square board; the first to
//! line up five or more in a row, column or diagonal wins. There are no
//! captures and no forbidden moves.
//!
//! # Architecture
//!
//! - [`board`]: Board representation with reversible placement
//! - [`rules`]: Win detection
//! - [`eval`]: Window-based position scoring
//! - [`search`]: Candidate generation and open-three scanning
//! - [`engine`]: The per-turn decision cascade
//! - [`config`]: Engine tuning, loadable from JSON
//! - [`record`] and [`replay`]: Saved games
//! - [`console`], [`selfplay`] and [`ui`]: Front ends
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Pos, Stone};
//!
//! let mut board = Board::new(15);
//! let mut engine = AIEngine::with_seed(EngineConfig::default(), 1);
//!
//! assert!(board.place_stone(7, 7));
//!
//! // Engine answers as White
//! if let Some(pos) = engine.select_move(&mut board) {
//!     assert!(board.place_stone(pos.row as usize, pos.col as usize));
//!     assert_eq!(board.get(pos), Stone::White);
//! }
//! assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod engine;
pub mod eval;
pub mod record;
pub mod replay;
pub mod rules;
pub mod search;
pub mod selfplay;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, WIN_LENGTH};
pub use config::{ConfigError, EngineConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use eval::{DefenseMultipliers, PatternWeights};
pub use record::{GameRecord, GameRecorder, RecordError};
