//! Main AI Engine: the per-turn decision cascade
//!
//! Each call to [`AIEngine::select_move`] runs the following steps for the
//! player to move and returns at the first one that produces a move:
//!
//! 1. **Immediate win**: a candidate that completes five for the mover
//! 2. **Block win**: a candidate that would complete five for the opponent
//! 3. **Block open three**: cover a flank of the opponent's open three
//! 4. **Lookahead**: two-ply worst-case search, or a single-ply ranking when
//!    there are more candidates than `max_search_candidates`
//!
//! All exploration mutates the caller's board through paired
//! [`Board::apply`]/[`Board::revert`] calls and leaves it exactly as it was.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, EngineConfig, Pos};
//!
//! let mut engine = AIEngine::with_seed(EngineConfig::default(), 7);
//! let mut board = Board::new(15);
//!
//! let result = engine.get_move_with_stats(&mut board);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! println!("Search type: {:?}", result.search_type);
//! ```

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Pos, Stone};
use crate::config::{ConfigError, EngineConfig};
use crate::eval::{evaluate, LOSS_SCORE, WIN_SCORE};
use crate::rules::{check_winner, is_winning_move};
use crate::search::{generate_candidates, open_three_blocks};

/// Step of the cascade that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Move completes five for the mover
    ImmediateWin,
    /// Move takes the cell where the opponent would complete five
    BlockWin,
    /// Move covers a flank of the opponent's open three
    BlockOpenThree,
    /// Two-ply worst-case search
    Lookahead,
    /// Single-ply ranking, used when there are too many candidates
    SinglePly,
    /// No empty cell left to play
    NoMove,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Heuristic value of the chosen move from the mover's perspective
    pub score: i64,
    /// Step that produced this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of positions scored by the evaluator
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn block_win(pos: Pos, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::BlockWin,
            time_ms,
            nodes: 0,
        }
    }

    #[inline]
    fn scored(
        (pos, score): (Pos, i64),
        search_type: SearchType,
        time_ms: u64,
        nodes: u64,
    ) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms,
            nodes,
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::NoMove,
            time_ms,
            nodes: 0,
        }
    }
}

/// Heuristic Gomoku opponent.
///
/// Owns its configuration and the random source used to break ties between
/// equally scored moves. Seed it for reproducible play.
pub struct AIEngine {
    config: EngineConfig,
    rng: SmallRng,
    /// Evaluator calls in the current search
    nodes: u64,
}

impl AIEngine {
    /// Engine with default settings and an entropy-seeded tie-breaker.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Reproducible engine: the same seed and positions give the same moves.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Engine with a caller-supplied tie-breaker.
    ///
    /// Constructors take `config` as already checked with
    /// [`EngineConfig::validate`] (as [`EngineConfig::load`] does); debug
    /// builds assert it. Use [`set_config`](Self::set_config) to swap in an
    /// unchecked config.
    #[must_use]
    pub fn with_rng(config: EngineConfig, rng: SmallRng) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid engine config");
        Self {
            config,
            rng,
            nodes: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the config after validating it. On error the engine keeps
    /// its current config.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Pick a move for `board.current_player()`.
    ///
    /// Returns `None` only when no empty cell is left. The board is used as
    /// scratch space during the search and is restored before returning.
    #[must_use]
    pub fn select_move(&mut self, board: &mut Board) -> Option<Pos> {
        self.get_move_with_stats(board).best_move
    }

    /// Like [`select_move`](Self::select_move), with search statistics.
    pub fn get_move_with_stats(&mut self, board: &mut Board) -> MoveResult {
        let start = Instant::now();
        self.nodes = 0;

        let snapshot = cfg!(debug_assertions).then(|| board.clone());
        let result = self.run_cascade(board, start);
        if let Some(before) = snapshot {
            assert_eq!(*board, before, "speculative search left the board modified");
        }
        result
    }

    fn run_cascade(&mut self, board: &mut Board, start: Instant) -> MoveResult {
        let elapsed = || start.elapsed().as_millis() as u64;
        let mover = board.current_player();
        let opponent = mover.opponent();

        let candidates = generate_candidates(board, self.config.search_radius);
        if candidates.is_empty() {
            return MoveResult::no_move(elapsed());
        }

        // 1. Win now
        if let Some(pos) = Self::find_winning_move(board, &candidates, mover) {
            return MoveResult::immediate_win(pos, elapsed());
        }

        // 2. Deny the opponent's winning cell
        if let Some(pos) = Self::find_winning_move(board, &candidates, opponent) {
            return MoveResult::block_win(pos, elapsed());
        }

        // 3. Cover an open three
        let must_block = open_three_blocks(board, opponent);
        let blocks: Vec<Pos> = candidates
            .iter()
            .copied()
            .filter(|pos| must_block.contains(pos))
            .collect();
        if !blocks.is_empty() {
            let scored = self.score_single_ply(board, &blocks);
            if let Some(best) = self.pick_best(scored) {
                return MoveResult::scored(best, SearchType::BlockOpenThree, elapsed(), self.nodes);
            }
        }

        // 4. Lookahead, or single ply when the candidate set is too wide
        let (scored, search_type) = if candidates.len() <= self.config.max_search_candidates {
            (self.score_two_ply(board, &candidates), SearchType::Lookahead)
        } else {
            (self.score_single_ply(board, &candidates), SearchType::SinglePly)
        };
        match self.pick_best(scored) {
            Some(best) => MoveResult::scored(best, search_type, elapsed(), self.nodes),
            None => MoveResult::no_move(elapsed()),
        }
    }

    /// First candidate that completes five for `color`.
    fn find_winning_move(board: &mut Board, candidates: &[Pos], color: Stone) -> Option<Pos> {
        candidates
            .iter()
            .copied()
            .find(|&pos| is_winning_move(board, pos, color))
    }

    /// Score each move by the position it leaves, from the mover's view.
    fn score_single_ply(&mut self, board: &mut Board, moves: &[Pos]) -> Vec<(Pos, i64)> {
        let mover = board.current_player();
        let mut scored = Vec::with_capacity(moves.len());
        for &pos in moves {
            let Some(undo) = board.apply(pos) else {
                continue;
            };
            self.nodes += 1;
            let score = evaluate(board, mover, &self.config.weights);
            board.revert(undo);
            scored.push((pos, score));
        }
        scored
    }

    /// Score each move by the opponent's best reply to it.
    fn score_two_ply(&mut self, board: &mut Board, moves: &[Pos]) -> Vec<(Pos, i64)> {
        let mut scored = Vec::with_capacity(moves.len());
        for &pos in moves {
            if let Some(value) = self.worst_case(board, pos) {
                scored.push((pos, value));
            }
        }
        scored
    }

    /// Value of playing `pos` assuming the opponent answers with the reply
    /// that minimizes our evaluation. `None` for an illegal cell.
    fn worst_case(&mut self, board: &mut Board, pos: Pos) -> Option<i64> {
        let mover = board.current_player();
        let opponent = mover.opponent();
        let undo = board.apply(pos)?;

        let value = if check_winner(board, Some(pos)) == Some(mover) {
            WIN_SCORE
        } else {
            let replies = generate_candidates(board, self.config.search_radius);
            let mut worst = None;
            for reply in replies {
                let Some(inner) = board.apply(reply) else {
                    continue;
                };
                let score = if check_winner(board, Some(reply)) == Some(opponent) {
                    LOSS_SCORE
                } else {
                    self.nodes += 1;
                    evaluate(board, mover, &self.config.weights)
                };
                board.revert(inner);

                worst = Some(worst.map_or(score, |w: i64| w.min(score)));
                if score == LOSS_SCORE {
                    break;
                }
            }
            // Board filled up: nothing left to answer with
            worst.unwrap_or_else(|| {
                self.nodes += 1;
                evaluate(board, mover, &self.config.weights)
            })
        };

        board.revert(undo);
        Some(value)
    }

    /// Highest score, ties broken uniformly at random.
    fn pick_best(&mut self, scored: Vec<(Pos, i64)>) -> Option<(Pos, i64)> {
        let best = scored.iter().map(|&(_, s)| s).max()?;
        let ties: Vec<(Pos, i64)> = scored.into_iter().filter(|&(_, s)| s == best).collect();
        ties.choose(&mut self.rng).copied()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternWeights;

    fn setup(size: usize, to_move: Stone, stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::with_first_player(size, to_move);
        for &(r, c, s) in stones {
            assert!(board.set_stone(Pos::new(r, c), s));
        }
        board
    }

    fn engine() -> AIEngine {
        AIEngine::with_seed(EngineConfig::default(), 42)
    }

    #[test]
    fn test_engine_empty_board() {
        let mut board = Board::new(15);
        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
        assert_eq!(board, Board::new(15));
    }

    #[test]
    fn test_engine_completes_open_four() {
        let mut board = setup(
            15,
            Stone::Black,
            &[
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (7, 7, Stone::Black),
                (7, 8, Stone::Black),
                (8, 6, Stone::White),
                (8, 7, Stone::White),
                (6, 7, Stone::White),
            ],
        );
        let result = engine().get_move_with_stats(&mut board);
        assert!(matches!(result.best_move, Some(p) if p == Pos::new(7, 4) || p == Pos::new(7, 9)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let mut board = setup(
            15,
            Stone::Black,
            &[
                (7, 5, Stone::White),
                (7, 6, Stone::White),
                (7, 7, Stone::White),
                (7, 8, Stone::White),
                (7, 4, Stone::Black),
                (3, 3, Stone::Black),
            ],
        );
        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.best_move, Some(Pos::new(7, 9)));
        assert_eq!(result.search_type, SearchType::BlockWin);
    }

    #[test]
    fn test_engine_blocks_open_four_end() {
        // Both ends win for White; the first in row-major order is taken
        let mut board = setup(
            15,
            Stone::Black,
            &[
                (7, 5, Stone::White),
                (7, 6, Stone::White),
                (7, 7, Stone::White),
                (7, 8, Stone::White),
                (9, 9, Stone::Black),
                (10, 10, Stone::Black),
            ],
        );
        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.best_move, Some(Pos::new(7, 4)));
        assert_eq!(result.search_type, SearchType::BlockWin);
    }

    #[test]
    fn test_win_beats_block() {
        let mut board = setup(
            15,
            Stone::White,
            &[
                (5, 5, Stone::White),
                (5, 6, Stone::White),
                (5, 7, Stone::White),
                (5, 8, Stone::White),
                (9, 5, Stone::Black),
                (9, 6, Stone::Black),
                (9, 7, Stone::Black),
                (9, 8, Stone::Black),
            ],
        );
        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert!(matches!(result.best_move, Some(p) if p.row == 5));
    }

    #[test]
    fn test_engine_blocks_open_three() {
        let mut board = setup(
            15,
            Stone::Black,
            &[
                (7, 6, Stone::White),
                (7, 7, Stone::White),
                (7, 8, Stone::White),
                (9, 6, Stone::Black),
                (10, 9, Stone::Black),
            ],
        );
        let result = engine().get_move_with_stats(&mut board);
        assert!(matches!(result.best_move, Some(p) if p == Pos::new(7, 5) || p == Pos::new(7, 9)));
        assert_eq!(result.search_type, SearchType::BlockOpenThree);
    }

    #[test]
    fn test_lookahead_used_under_ceiling() {
        let mut board = setup(15, Stone::White, &[(7, 7, Stone::Black)]);
        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.search_type, SearchType::Lookahead);
        let pos = result.best_move.expect("move");
        assert!(pos.distance(Pos::new(7, 7)) <= 2);
        assert!(result.nodes > 0);
    }

    /// White four on row 7 capped by Black at (7, 4), open at (7, 9), and
    /// a Black open three on row 3. Black to move.
    fn four_against_three() -> Board {
        setup(
            15,
            Stone::Black,
            &[
                (7, 4, Stone::Black),
                (7, 5, Stone::White),
                (7, 6, Stone::White),
                (7, 7, Stone::White),
                (7, 8, Stone::White),
                (3, 4, Stone::Black),
                (3, 5, Stone::Black),
                (3, 6, Stone::Black),
            ],
        )
    }

    #[test]
    fn test_worst_case_winning_move() {
        let mut board = setup(
            15,
            Stone::Black,
            &[
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (7, 7, Stone::Black),
                (7, 8, Stone::Black),
                (8, 5, Stone::White),
                (8, 6, Stone::White),
                (8, 7, Stone::White),
            ],
        );
        let before = board.clone();
        let mut engine = engine();

        assert_eq!(engine.worst_case(&mut board, Pos::new(7, 9)), Some(WIN_SCORE));
        assert_eq!(engine.worst_case(&mut board, Pos::new(7, 4)), Some(WIN_SCORE));
        assert_eq!(engine.worst_case(&mut board, Pos::new(7, 7)), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_worst_case_opponent_wins_reply() {
        let mut board = four_against_three();
        let before = board.clone();
        let mut engine = engine();

        // Ignoring the four lets White complete five at (7, 9)
        assert_eq!(engine.worst_case(&mut board, Pos::new(3, 7)), Some(LOSS_SCORE));
        assert_eq!(engine.worst_case(&mut board, Pos::new(3, 3)), Some(LOSS_SCORE));

        let blocked = engine.worst_case(&mut board, Pos::new(7, 9)).unwrap();
        assert!(blocked > LOSS_SCORE);
        assert_eq!(board, before);
    }

    #[test]
    fn test_two_ply_reorders_single_ply() {
        let config = EngineConfig {
            weights: PatternWeights::symmetric(),
            ..EngineConfig::default()
        };
        let mut engine = AIEngine::with_seed(config, 42);
        let mut board = four_against_three();
        let extend = Pos::new(3, 7);
        let block = Pos::new(7, 9);
        let moves = [extend, block];

        // Statically, making an open four outweighs capping White's four
        let single = engine.score_single_ply(&mut board, &moves);
        assert_eq!(single.len(), 2);
        assert!(single[0].1 > single[1].1, "{single:?}");

        // White's best reply to the open four is five in a row
        let two = engine.score_two_ply(&mut board, &moves);
        assert_eq!(two[0], (extend, LOSS_SCORE));
        assert!(two[1].1 > two[0].1, "{two:?}");

        // Opponent replies can only lower a move's static value
        assert!(two[1].1 <= single[1].1, "{two:?} {single:?}");
        assert_eq!(engine.pick_best(two).map(|(p, _)| p), Some(block));
    }

    #[test]
    fn test_set_config_validates() {
        let mut engine = engine();
        let bad = EngineConfig {
            search_radius: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(engine.set_config(bad), Err(ConfigError::ZeroRadius)));
        assert_eq!(engine.config().search_radius, 2);

        let wider = EngineConfig {
            search_radius: 3,
            ..EngineConfig::default()
        };
        assert!(engine.set_config(wider).is_ok());
        assert_eq!(engine.config().search_radius, 3);
    }

    #[test]
    fn test_single_ply_fallback_over_ceiling() {
        let config = EngineConfig {
            search_radius: 1,
            max_search_candidates: 3,
            ..EngineConfig::default()
        };
        let mut board = setup(15, Stone::Black, &[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        let before = board.clone();

        let mut engine = AIEngine::with_seed(config, 1);
        let result = engine.get_move_with_stats(&mut board);

        assert_eq!(result.search_type, SearchType::SinglePly);
        // 3x4 box minus the two stones
        assert_eq!(result.nodes, 10);
        let pos = result.best_move.expect("move");
        assert!(board.stones().any(|(s, _)| s.distance(pos) == 1));
        assert_eq!(board, before);
    }

    #[test]
    fn test_zero_ceiling_disables_lookahead() {
        let config = EngineConfig {
            max_search_candidates: 0,
            ..EngineConfig::default()
        };
        let mut board = Board::new(15);
        let result = AIEngine::with_seed(config, 3).get_move_with_stats(&mut board);
        assert_eq!(result.search_type, SearchType::SinglePly);
        assert_eq!(result.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_no_move_on_full_board() {
        // No row, column or diagonal holds five of one color
        const ROWS: [&str; 5] = ["BBWWB", "WWBBW", "BBWWB", "WWBBW", "BBWWB"];
        let mut board = Board::new(5);
        for (r, row) in ROWS.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let stone = if ch == 'B' { Stone::Black } else { Stone::White };
                board.set_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        assert!(board.is_full());

        let result = engine().get_move_with_stats(&mut board);
        assert_eq!(result.best_move, None);
        assert_eq!(result.search_type, SearchType::NoMove);
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new(15);
        for (r, c) in [(7, 7), (7, 8), (8, 8), (6, 6), (8, 7), (9, 9)] {
            board.place_stone(r, c);
        }
        let before = board.clone();
        let _ = engine().select_move(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut engine = AIEngine::with_seed(EngineConfig::default(), seed);
            let mut board = Board::new(9);
            let mut moves = Vec::new();
            for _ in 0..6 {
                let pos = engine.select_move(&mut board).expect("move");
                assert!(board.place_stone(pos.row as usize, pos.col as usize));
                moves.push(pos);
            }
            moves
        };
        assert_eq!(play(11), play(11));
    }

    #[test]
    fn test_engine_alternating_colors() {
        let mut engine = engine();
        let mut board = Board::new(15);
        for _ in 0..6 {
            let mover = board.current_player();
            let pos = engine.select_move(&mut board).expect("move");
            assert!(board.place_stone(pos.row as usize, pos.col as usize));
            assert_eq!(board.get(pos), mover);
        }
        assert_eq!(board.move_count(), 6);
    }
}
