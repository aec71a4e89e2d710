//! Open-three detection
//!
//! An open three `_XXX_` becomes an unstoppable open four on the next move,
//! so both flanking cells must be covered before anything else is searched.
//! Only the exact gap-free pattern inside one five-cell window is matched;
//! split threes such as `_XX_X_` are left to the evaluator.

use std::collections::BTreeSet;

use crate::board::{Board, Pos, Stone};

/// Flanking cells of every open three of `color`.
///
/// Scans every five-cell window for `[Empty, X, X, X, Empty]` and collects
/// both empty ends. Ordered row-major.
#[must_use]
pub fn open_three_blocks(board: &Board, color: Stone) -> BTreeSet<Pos> {
    let mut blocks = BTreeSet::new();
    if color == Stone::Empty {
        return blocks;
    }

    for window in board.windows() {
        let [first, a, b, c, last] = window;
        if board.is_empty(first)
            && board.is_empty(last)
            && [a, b, c].iter().all(|&p| board.get(p) == color)
        {
            blocks.insert(first);
            blocks.insert(last);
        }
    }
    blocks
}
