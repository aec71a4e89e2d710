//! Heuristic evaluation function for Gomoku board positions
//!
//! Slides a five-cell window over every line of the board. A window holding
//! stones of only one color scores by its stone count; mixed and empty
//! windows score nothing. Our windows add, the opponent's subtract.

use crate::board::{Board, Stone};

use super::patterns::PatternWeights;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
///
/// Without defense multipliers the score is antisymmetric:
/// `evaluate(b, Black, w) == -evaluate(b, White, w)`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone, weights: &PatternWeights) -> i64 {
    if color == Stone::Empty {
        return 0;
    }
    let opponent = color.opponent();

    let mut score = 0i64;
    for window in board.windows() {
        let mut mine = 0;
        let mut theirs = 0;
        for pos in window {
            match board.get(pos) {
                s if s == color => mine += 1,
                s if s == opponent => theirs += 1,
                _ => {}
            }
        }

        score = match (mine, theirs) {
            (0, 0) => score,
            (m, 0) => score.saturating_add(weights.attack(m)),
            (0, t) => score.saturating_sub(weights.defense(t)),
            _ => score, // blocked
        };
    }
    score
}
