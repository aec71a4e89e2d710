//! Step through a saved game

use crate::board::{Board, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::record::{GameRecord, MoveRecord, RecordError};

/// Cursor over a [`GameRecord`]
///
/// Every move is checked when the replay is created, so stepping never
/// fails afterwards.
#[derive(Debug, Clone)]
pub struct Replay {
    record: GameRecord,
    board: Board,
    position: usize,
}

impl Replay {
    pub fn new(record: GameRecord) -> Result<Self, RecordError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&record.board_size) {
            return Err(RecordError::BoardSize(record.board_size));
        }

        // Dry run over the whole game
        let mut board = Board::with_first_player(record.board_size, record.first_stone());
        for m in &record.moves {
            place(&mut board, m)?;
        }

        let board = Board::with_first_player(record.board_size, record.first_stone());
        Ok(Self {
            record,
            board,
            position: 0,
        })
    }

    /// Apply the next move; `None` once the end is reached
    pub fn step_forward(&mut self) -> Option<&MoveRecord> {
        let m = self.record.moves.get(self.position)?;
        // Validated in `new`
        if place(&mut self.board, m).is_err() {
            return None;
        }
        self.position += 1;
        Some(m)
    }

    /// Take back the last applied move; `false` at the start
    pub fn step_back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.seek(self.position - 1);
        true
    }

    /// Rebuild the board after the first `target` moves (clamped)
    pub fn seek(&mut self, target: usize) {
        let target = target.min(self.record.moves.len());
        self.board = Board::with_first_player(self.record.board_size, self.record.first_stone());
        self.position = 0;
        while self.position < target && self.step_forward().is_some() {}
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves applied so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_moves(&self) -> usize {
        self.record.moves.len()
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.record.moves.len()
    }

    /// Recorded winner, `None` for a draw or unfinished game
    pub fn winner(&self) -> Option<Stone> {
        self.record.winner_stone()
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }
}

fn place(board: &mut Board, m: &MoveRecord) -> Result<(), RecordError> {
    let stone = m.stone()?;
    let illegal = RecordError::IllegalMove {
        index: m.index,
        row: m.row,
        col: m.col,
    };
    // Bounds first: `Pos` only holds coordinates below MAX_BOARD_SIZE
    if m.row as usize >= board.size() || m.col as usize >= board.size() {
        return Err(illegal);
    }
    if !board.set_stone(m.pos(), stone) {
        return Err(illegal);
    }
    board.set_current_player(stone.opponent());
    Ok(())
}
