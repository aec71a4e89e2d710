//! Game state management for the Gomoku GUI

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::record::{GameRecord, GameRecorder, RecordError};
use crate::replay::Replay;
use crate::rules::winning_line;
use crate::{AIEngine, Board, EngineConfig, MoveResult, Pos, Stone, DEFAULT_BOARD_SIZE};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human_color: Stone },
    /// Player vs Player (hotseat)
    PvP { show_suggestions: bool },
    /// Stepping through a saved record
    Replay,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

/// Settings shared by every game started from the GUI
#[derive(Debug, Clone)]
pub struct GuiSettings {
    pub board_size: usize,
    pub config: EngineConfig,
    /// Fixed seed for reproducible AI play; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            config: EngineConfig::default(),
            seed: None,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// `None` for a draw
    pub winner: Option<Stone>,
    pub winning_line: Option<Vec<Pos>>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub game_over: Option<GameResult>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    settings: GuiSettings,
    hint_engine: AIEngine,
    recorder: GameRecorder,
    replay: Option<Replay>,
}

impl GameState {
    pub fn new(mode: GameMode, settings: GuiSettings) -> Self {
        let hint_engine = Self::make_engine(&settings, 0);
        Self {
            board: Board::new(settings.board_size),
            mode,
            game_over: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            recorder: GameRecorder::new(settings.board_size, Stone::Black),
            hint_engine,
            settings,
            replay: None,
        }
    }

    /// Open `record` in replay mode, positioned before the first move
    pub fn from_record(record: GameRecord, settings: GuiSettings) -> Result<Self, RecordError> {
        let replay = Replay::new(record)?;
        let mut state = Self::new(GameMode::Replay, settings);
        state.board = replay.board().clone();
        state.replay = Some(replay);
        Ok(state)
    }

    fn make_engine(settings: &GuiSettings, salt: u64) -> AIEngine {
        match settings.seed {
            Some(seed) => AIEngine::with_seed(settings.config.clone(), seed.wrapping_add(salt)),
            None => AIEngine::with_config(settings.config.clone()),
        }
    }

    pub fn settings(&self) -> &GuiSettings {
        &self.settings
    }

    pub fn reset(&mut self) {
        if self.mode == GameMode::Replay {
            self.replay_seek(0);
            return;
        }
        *self = Self::new(self.mode, self.settings.clone());
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.board.current_player()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.board.last_move()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() == human_color,
            GameMode::PvP { .. } => true,
            GameMode::Replay => false,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() != human_color,
            GameMode::PvP { .. } | GameMode::Replay => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if self.mode == GameMode::Replay {
            return Err("Replay is read-only".to_string());
        }

        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        if !self.board.is_empty(pos) {
            return Err("Cell is occupied".to_string());
        }

        self.execute_move(pos);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn();
        if !self.board.place_stone(pos.row as usize, pos.col as usize) {
            self.message = Some(format!("Illegal move at ({}, {})", pos.row, pos.col));
            return;
        }

        self.move_history.push((pos, color));
        self.recorder.add_move(color, pos);
        self.suggested_move = None;
        self.move_timer.stop();

        if let Some(line) = winning_line(&self.board, pos) {
            self.recorder.set_winner(Some(color));
            self.game_over = Some(GameResult {
                winner: Some(color),
                winning_line: Some(line),
            });
            return;
        }
        if self.board.is_full() {
            self.game_over = Some(GameResult {
                winner: None,
                winning_line: None,
            });
            return;
        }

        self.move_timer.start();
        self.message = None;
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let mut board = self.board.clone();
        let mut engine = Self::make_engine(&self.settings, board.move_count() as u64);

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&mut board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => self.execute_move(pos),
                None => {
                    self.game_over = Some(GameResult {
                        winner: None,
                        winning_line: None,
                    });
                    self.message = Some("AI has no move; draw".to_string());
                }
            }
            self.last_ai_result = Some(move_result);
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Ask the engine for the side to move (PvP hint)
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() || self.mode == GameMode::Replay {
            return;
        }

        let mut board = self.board.clone();
        let result = self.hint_engine.get_move_with_stats(&mut board);

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Undo last move
    pub fn undo(&mut self) {
        if self.mode == GameMode::Replay {
            self.replay_step_back();
            return;
        }
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        // For PvE, undo back to the human's turn
        let undo_count = match self.mode {
            GameMode::PvE { human_color } => {
                let last_color = self.move_history.last().map(|&(_, c)| c);
                if last_color == Some(human_color) || self.move_history.len() < 2 {
                    1
                } else {
                    2
                }
            }
            _ => 1,
        };

        let moves_to_keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<_> = self.move_history.drain(..moves_to_keep).collect();
        self.move_history.clear();

        // Rebuild from the start
        self.board = Board::new(self.settings.board_size);
        self.recorder = GameRecorder::new(self.settings.board_size, Stone::Black);
        self.game_over = None;
        self.suggested_move = None;
        self.message = None;

        for (pos, color) in moves {
            self.board.place_stone(pos.row as usize, pos.col as usize);
            self.recorder.add_move(color, pos);
            self.move_history.push((pos, color));
        }

        self.move_timer.start();
    }

    /// Save the game played so far under `records/`
    pub fn save_record(&mut self) -> Result<PathBuf, RecordError> {
        let prefix = match self.mode {
            GameMode::PvE { .. } => "pve",
            GameMode::PvP { .. } => "pvp",
            GameMode::Replay => "replay",
        };
        let path = match &self.replay {
            Some(replay) => replay.record().save_in(crate::record::RECORDS_DIR, prefix)?,
            None => self.recorder.save_to_default(prefix)?,
        };
        self.message = Some(format!("Saved {}", path.display()));
        Ok(path)
    }

    /// Replay cursor, when in replay mode
    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    pub fn replay_step_forward(&mut self) {
        if let Some(replay) = self.replay.as_mut() {
            replay.step_forward();
        }
        self.sync_replay();
    }

    pub fn replay_step_back(&mut self) {
        if let Some(replay) = self.replay.as_mut() {
            replay.step_back();
        }
        self.sync_replay();
    }

    pub fn replay_seek(&mut self, target: usize) {
        if let Some(replay) = self.replay.as_mut() {
            replay.seek(target);
        }
        self.sync_replay();
    }

    /// Copy the replay board into view; show the result at the final move
    fn sync_replay(&mut self) {
        let Some(replay) = &self.replay else {
            return;
        };
        self.board = replay.board().clone();
        self.game_over = replay.is_finished().then(|| GameResult {
            winner: replay.winner(),
            winning_line: self
                .board
                .last_move()
                .and_then(|pos| winning_line(&self.board, pos)),
        });
    }
}
