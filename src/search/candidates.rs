//! Candidate move generation
//!
//! Moves far from every stone are never worth considering, so the search
//! only looks at empty cells inside the stones' bounding box grown by the
//! search radius.

use crate::board::{Board, Pos, Stone};

/// Generate candidate moves near existing stones, in row-major order.
///
/// An empty board yields only its center cell. A full board yields nothing.
#[must_use]
pub fn generate_candidates(board: &Board, radius: usize) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let Some((min_row, max_row, min_col, max_col)) = bounding_box(board) else {
        return Vec::new();
    };

    let last = board.size() - 1;
    let rows = min_row.saturating_sub(radius)..=(max_row + radius).min(last);
    let cols = min_col.saturating_sub(radius)..=(max_col + radius).min(last);

    let mut moves = Vec::with_capacity(rows.clone().count() * cols.clone().count());
    for r in rows {
        for c in cols.clone() {
            let pos = Pos::new(r as u8, c as u8);
            if board.get(pos) == Stone::Empty {
                moves.push(pos);
            }
        }
    }
    moves
}

/// `(min_row, max_row, min_col, max_col)` over all stones
fn bounding_box(board: &Board) -> Option<(usize, usize, usize, usize)> {
    board.stones().fold(None, |acc, (pos, _)| {
        let (r, c) = (pos.row as usize, pos.col as usize);
        Some(match acc {
            None => (r, r, c, c),
            Some((r0, r1, c0, c1)) => (r0.min(r), r1.max(r), c0.min(c), c1.max(c)),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_yields_center() {
        assert_eq!(generate_candidates(&Board::new(15), 2), vec![Pos::new(7, 7)]);
        assert_eq!(generate_candidates(&Board::new(9), 3), vec![Pos::new(4, 4)]);
    }

    #[test]
    fn test_single_stone_radius() {
        let mut board = Board::new(15);
        board.place_stone(7, 7);
        let moves = generate_candidates(&board, 2);
        assert_eq!(moves.len(), 24);
        assert!(!moves.contains(&Pos::new(7, 7)));
        assert!(moves.iter().all(|p| p.distance(Pos::new(7, 7)) <= 2));
    }

    #[test]
    fn test_clipped_at_corner() {
        let mut board = Board::new(15);
        board.place_stone(0, 0);
        let moves = generate_candidates(&board, 2);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.first(), Some(&Pos::new(0, 1)));
        assert_eq!(moves.last(), Some(&Pos::new(2, 2)));
    }

    #[test]
    fn test_bounding_box_covers_cluster() {
        let mut board = Board::new(15);
        board.place_stone(5, 5);
        board.place_stone(8, 9);
        let moves = generate_candidates(&board, 1);
        // rows 4..=9, cols 4..=10, minus two stones
        assert_eq!(moves.len(), 6 * 7 - 2);
        // The far corner of the box is included even though no stone touches it
        assert!(moves.contains(&Pos::new(4, 10)));
        assert!(!moves.contains(&Pos::new(3, 5)));
    }

    #[test]
    fn test_row_major_order() {
        let mut board = Board::new(15);
        board.place_stone(7, 7);
        let moves = generate_candidates(&board, 1);
        let mut sorted = moves.clone();
        sorted.sort();
        assert_eq!(moves, sorted);
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let mut board = Board::new(5);
        for r in 0..5 {
            for c in 0..5 {
                board.place_stone(r, c);
            }
        }
        assert!(generate_candidates(&board, 2).is_empty());
    }
}
