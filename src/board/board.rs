//! Board structure with turn tracking and reversible placement

use std::fmt;

use super::{Pos, Stone, DIRECTIONS, MAX_BOARD_SIZE, MIN_BOARD_SIZE, WIN_LENGTH};

/// Game board
///
/// Holds the grid, whose turn it is, the most recent placement and the
/// number of stones on the board. `move_count` always equals the number of
/// non-empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    current_player: Stone,
    last_move: Option<Pos>,
    move_count: usize,
}

/// Token returned by [`Board::apply`], consumed by [`Board::revert`].
///
/// Holds everything a placement overwrote, so reverting restores the board
/// exactly. Tokens must be reverted in reverse order of application.
#[must_use = "a speculative placement must be reverted"]
#[derive(Debug)]
pub struct Undo {
    pos: Pos,
    prev_player: Stone,
    prev_last_move: Option<Pos>,
}

impl Undo {
    /// Position the undone placement occupied
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Board {
    /// Create an empty board of side `size` with Black to move.
    ///
    /// # Panics
    /// Panics if `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        Self::with_first_player(size, Stone::Black)
    }

    /// Create an empty board where `first` moves first.
    pub fn with_first_player(size: usize, first: Stone) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
        );
        assert!(first != Stone::Empty, "first player must be a color");
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            current_player: first,
            last_move: None,
            move_count: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn current_player(&self) -> Stone {
        self.current_player
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Center cell, the opening move on an empty board
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    #[inline]
    pub fn is_on_board(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// In bounds and empty
    #[inline]
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col] == Stone::Empty
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Row-major view of every cell
    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    /// Step `k` cells from `pos` along `(dr, dc)`, if still on the board
    #[inline]
    pub fn offset(&self, pos: Pos, dr: i32, dc: i32, k: i32) -> Option<Pos> {
        let r = pos.row as i32 + dr * k;
        let c = pos.col as i32 + dc * k;
        self.is_on_board(r, c).then(|| Pos::new(r as u8, c as u8))
    }

    /// Iterate over occupied cells in row-major order
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != Stone::Empty)
            .map(move |(i, s)| (Pos::from_index(i, size), *s))
    }

    /// Every run of `WIN_LENGTH` cells along the four directions
    pub fn windows(&self) -> Windows<'_> {
        Windows {
            board: self,
            dir: 0,
            idx: 0,
        }
    }

    /// Place the current player's stone and pass the turn.
    ///
    /// Returns `false` without touching the board when the cell is out of
    /// bounds or occupied.
    pub fn place_stone(&mut self, row: usize, col: usize) -> bool {
        if !self.is_valid_move(row, col) {
            return false;
        }
        let pos = Pos::new(row as u8, col as u8);
        let stone = self.current_player;
        self.put(pos, stone);
        self.current_player = stone.opponent();
        true
    }

    /// Speculatively place the current player's stone.
    ///
    /// Returns `None` (board untouched) for an illegal cell.
    pub fn apply(&mut self, pos: Pos) -> Option<Undo> {
        self.apply_as(pos, self.current_player)
    }

    /// Speculatively place `stone` at `pos`; the turn passes to its opponent.
    pub fn apply_as(&mut self, pos: Pos, stone: Stone) -> Option<Undo> {
        if stone == Stone::Empty || !self.is_valid_move(pos.row as usize, pos.col as usize) {
            return None;
        }
        let undo = Undo {
            pos,
            prev_player: self.current_player,
            prev_last_move: self.last_move,
        };
        self.put(pos, stone);
        self.current_player = stone.opponent();
        Some(undo)
    }

    /// Undo a speculative placement
    pub fn revert(&mut self, undo: Undo) {
        let idx = undo.pos.to_index(self.size);
        debug_assert!(self.cells[idx] != Stone::Empty, "revert of an empty cell");
        debug_assert_eq!(self.last_move, Some(undo.pos), "reverts out of order");
        self.cells[idx] = Stone::Empty;
        self.move_count -= 1;
        self.last_move = undo.prev_last_move;
        self.current_player = undo.prev_player;
    }

    /// Put a stone of an explicit color without passing the turn.
    ///
    /// Used to set up positions and to replay records. Returns `false` for
    /// an illegal cell or `Stone::Empty`.
    pub fn set_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || !self.is_valid_move(pos.row as usize, pos.col as usize) {
            return false;
        }
        self.put(pos, stone);
        true
    }

    /// Whose turn follows after an externally driven move
    pub fn set_current_player(&mut self, stone: Stone) {
        debug_assert!(stone != Stone::Empty);
        self.current_player = stone;
    }

    #[inline]
    fn put(&mut self, pos: Pos, stone: Stone) {
        self.cells[pos.to_index(self.size)] = stone;
        self.last_move = Some(pos);
        self.move_count += 1;
    }

    /// Winner through `coord`, or through the last move when `None`
    #[inline]
    pub fn check_winner(&self, coord: Option<Pos>) -> Option<Stone> {
        crate::rules::check_winner(self, coord)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count >= self.size * self.size
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.move_count == 0
    }
}

impl fmt::Display for Board {
    /// Columns lettered from A, rows numbered from 1.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.size {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{:2}", r + 1)?;
            for c in 0..self.size {
                let ch = match self.get(Pos::new(r as u8, c as u8)) {
                    Stone::Empty => '.',
                    Stone::Black => '●',
                    Stone::White => '○',
                };
                write!(f, " {ch}")?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over evaluation windows, see [`Board::windows`]
pub struct Windows<'a> {
    board: &'a Board,
    dir: usize,
    idx: usize,
}

impl Iterator for Windows<'_> {
    type Item = [Pos; WIN_LENGTH];

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.board.size;
        let span = WIN_LENGTH as i32 - 1;
        while self.dir < DIRECTIONS.len() {
            let (dr, dc) = DIRECTIONS[self.dir];
            while self.idx < size * size {
                let start = Pos::from_index(self.idx, size);
                self.idx += 1;
                if self.board.offset(start, dr, dc, span).is_none() {
                    continue;
                }
                let mut window = [start; WIN_LENGTH];
                for (k, cell) in window.iter_mut().enumerate().skip(1) {
                    *cell = Pos::new(
                        (start.row as i32 + dr * k as i32) as u8,
                        (start.col as i32 + dc * k as i32) as u8,
                    );
                }
                return Some(window);
            }
            self.dir += 1;
            self.idx = 0;
        }
        None
    }
}
