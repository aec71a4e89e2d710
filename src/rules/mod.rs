//! Game rules for freestyle Gomoku
//!
//! Five or more stones of one color in an unbroken line win. There are no
//! forbidden moves and overlines count.

pub mod win;

// Re-exports for convenient access
pub use win::{check_winner, count_line, is_winning_move, winning_line};
