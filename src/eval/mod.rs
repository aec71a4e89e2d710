//! Position evaluation module

pub mod heuristic;
pub mod patterns;

pub use heuristic::evaluate;
pub use patterns::{
    DefenseMultipliers, PatternWeights, DEFAULT_SCORE_TABLE, LOSS_SCORE, WIN_SCORE,
};
