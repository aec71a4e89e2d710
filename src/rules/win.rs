//! Win condition checking
//!
//! A placement wins when it completes a run of `WIN_LENGTH` or more stones
//! along any of the four directions. Only lines through the given cell are
//! inspected, so the check is O(board side) rather than a full-board scan.

use crate::board::{Board, Pos, Stone, DIRECTIONS, WIN_LENGTH};

/// Count contiguous stones matching the one at `pos` along `(dr, dc)`,
/// in both directions, including `pos` itself.
///
/// Returns 0 for an empty cell.
pub fn count_line(board: &Board, pos: Pos, (dr, dc): (i32, i32)) -> usize {
    let color = board.get(pos);
    if color == Stone::Empty {
        return 0;
    }

    let mut count = 1;
    for sign in [1, -1] {
        let mut k = 1;
        while let Some(next) = board.offset(pos, dr * sign, dc * sign, k) {
            if board.get(next) != color {
                break;
            }
            count += 1;
            k += 1;
        }
    }
    count
}

/// Check for a winner through `coord` (defaults to the last move).
///
/// Returns `Some(color)` of the stone at that cell if any direction holds
/// `WIN_LENGTH` or more in a row, `None` otherwise.
pub fn check_winner(board: &Board, coord: Option<Pos>) -> Option<Stone> {
    let pos = coord.or(board.last_move())?;
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }

    DIRECTIONS
        .iter()
        .any(|&dir| count_line(board, pos, dir) >= WIN_LENGTH)
        .then_some(color)
}

/// Would `color` win by playing `pos`?
///
/// Uses a speculative placement, so the board is restored before returning.
pub fn is_winning_move(board: &mut Board, pos: Pos, color: Stone) -> bool {
    let Some(undo) = board.apply_as(pos, color) else {
        return false;
    };
    let wins = check_winner(board, Some(pos)) == Some(color);
    board.revert(undo);
    wins
}

/// Find the full winning run through `pos`, ordered along its line.
pub fn winning_line(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        let mut k = 1;
        while let Some(prev) = board.offset(pos, -dr, -dc, k) {
            if board.get(prev) != color {
                break;
            }
            line.insert(0, prev);
            k += 1;
        }

        k = 1;
        while let Some(next) = board.offset(pos, dr, dc, k) {
            if board.get(next) != color {
                break;
            }
            line.push(next);
            k += 1;
        }

        if line.len() >= WIN_LENGTH {
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new(15);
        for &(r, c, s) in stones {
            assert!(board.set_stone(Pos::new(r, c), s));
        }
        board
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let stones: Vec<_> = (0..5).map(|i| (7, i, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, Some(Pos::new(7, 2))), Some(Stone::Black));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let stones: Vec<_> = (3..8).map(|i| (i, 9, Stone::White)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, Some(Pos::new(3, 9))), Some(Stone::White));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let stones: Vec<_> = (0..5).map(|i| (i, i, Stone::White)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, Some(Pos::new(4, 4))), Some(Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        let stones: Vec<_> = (0..5).map(|i| (4 + i, 8 - i, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, None), Some(Stone::Black));
    }

    #[test]
    fn test_six_in_row_also_wins() {
        let stones: Vec<_> = (0..6).map(|i| (9, i, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, Some(Pos::new(9, 0))), Some(Stone::Black));
        assert_eq!(count_line(&board, Pos::new(9, 3), (0, 1)), 6);
    }

    #[test]
    fn test_four_in_row_not_win() {
        let stones: Vec<_> = (0..4).map(|i| (9, i, Stone::Black)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, None), None);
    }

    #[test]
    fn test_broken_line_not_win() {
        let board = board_with(&[
            (5, 0, Stone::Black),
            (5, 1, Stone::Black),
            (5, 2, Stone::White),
            (5, 3, Stone::Black),
            (5, 4, Stone::Black),
            (5, 5, Stone::Black),
        ]);
        assert_eq!(check_winner(&board, Some(Pos::new(5, 1))), None);
    }

    #[test]
    fn test_no_winner_on_empty() {
        let board = Board::new(15);
        assert_eq!(check_winner(&board, None), None);
        assert_eq!(check_winner(&board, Some(Pos::new(7, 7))), None);
    }

    #[test]
    fn test_defaults_to_last_move() {
        let mut board = Board::new(15);
        // Black builds a row on 0, White answers on row 1
        for i in 0..4 {
            board.place_stone(0, i);
            board.place_stone(1, i);
        }
        assert_eq!(check_winner(&board, None), None);
        board.place_stone(0, 4);
        assert_eq!(board.check_winner(None), Some(Stone::Black));
    }

    #[test]
    fn test_five_at_corner() {
        let stones: Vec<_> = (10..15).map(|i| (i, i, Stone::White)).collect();
        let board = board_with(&stones);
        assert_eq!(check_winner(&board, Some(Pos::new(14, 14))), Some(Stone::White));
    }

    #[test]
    fn test_count_matches_winner_for_every_cell() {
        let mut board = board_with(&[
            (7, 3, Stone::Black),
            (7, 4, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (8, 8, Stone::White),
            (9, 9, Stone::White),
            (10, 10, Stone::White),
            (11, 11, Stone::White),
        ]);
        board.set_current_player(Stone::Black);

        for r in 0..15u8 {
            for c in 0..15u8 {
                let pos = Pos::new(r, c);
                if !board.is_empty(pos) {
                    continue;
                }
                let undo = board.apply(pos).expect("empty cell");
                let longest = DIRECTIONS
                    .iter()
                    .map(|&d| count_line(&board, pos, d))
                    .max()
                    .unwrap_or(0);
                let winner = check_winner(&board, Some(pos));
                if longest >= WIN_LENGTH {
                    assert_eq!(winner, Some(Stone::Black));
                } else {
                    assert_eq!(winner, None);
                }
                board.revert(undo);
            }
        }
    }

    #[test]
    fn test_is_winning_move() {
        let stones: Vec<_> = (5..9).map(|i| (3, i, Stone::White)).collect();
        let mut board = board_with(&stones);
        let before = board.clone();
        assert!(is_winning_move(&mut board, Pos::new(3, 4), Stone::White));
        assert!(is_winning_move(&mut board, Pos::new(3, 9), Stone::White));
        assert!(!is_winning_move(&mut board, Pos::new(3, 9), Stone::Black));
        assert!(!is_winning_move(&mut board, Pos::new(3, 5), Stone::White));
        assert_eq!(board, before);
    }

    #[test]
    fn test_winning_line_positions() {
        let stones: Vec<_> = (2..7).map(|i| (i, 12, Stone::Black)).collect();
        let board = board_with(&stones);
        let line = winning_line(&board, Pos::new(4, 12)).expect("five");
        let expected: Vec<_> = (2..7).map(|i| Pos::new(i, 12)).collect();
        assert_eq!(line, expected);
        assert!(winning_line(&board, Pos::new(0, 0)).is_none());
    }
}
