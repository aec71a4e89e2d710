//! Pattern weights for Gomoku evaluation
//!
//! A window of five cells holding only one color scores by how many stones
//! it holds. The table grows steeply so that a single long run outweighs any
//! realistic pile of short ones.

use serde::{Deserialize, Serialize};

use crate::board::WIN_LENGTH;
use crate::config::ConfigError;

/// Saturating score for a position the mover has already won.
pub const WIN_SCORE: i64 = i64::MAX;
/// Saturating score for a position the opponent has already won.
pub const LOSS_SCORE: i64 = -i64::MAX;

/// Minimum growth from one run-length to the next, for lengths 3 and above.
pub const MIN_GROWTH_FACTOR: i64 = 4;

/// Default per-window scores, indexed by run-length minus one.
pub const DEFAULT_SCORE_TABLE: [i64; WIN_LENGTH] = [10, 100, 1_000, 10_000, 1_000_000];

/// Extra weight on the opponent's threes and fours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseMultipliers {
    pub three: i64,
    pub four: i64,
}

impl Default for DefenseMultipliers {
    fn default() -> Self {
        Self { three: 2, four: 3 }
    }
}

/// Score table plus optional defense bias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternWeights {
    /// Window score for run-lengths 1..=5
    pub score_table: [i64; WIN_LENGTH],
    /// `None` keeps the evaluation antisymmetric between the two colors
    pub defense_multipliers: Option<DefenseMultipliers>,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            score_table: DEFAULT_SCORE_TABLE,
            defense_multipliers: Some(DefenseMultipliers::default()),
        }
    }
}

impl PatternWeights {
    /// Default table without defense weighting
    pub fn symmetric() -> Self {
        Self {
            score_table: DEFAULT_SCORE_TABLE,
            defense_multipliers: None,
        }
    }

    /// Score of a window holding `run` of our stones and nothing else
    #[inline]
    pub fn attack(&self, run: usize) -> i64 {
        debug_assert!((1..=WIN_LENGTH).contains(&run));
        self.score_table[run - 1]
    }

    /// Penalty for a window holding `run` of the opponent's stones
    #[inline]
    pub fn defense(&self, run: usize) -> i64 {
        let base = self.attack(run);
        match (self.defense_multipliers, run) {
            (Some(m), 3) => base.saturating_mul(m.three),
            (Some(m), 4) => base.saturating_mul(m.four),
            _ => base,
        }
    }

    /// Check the table is positive, strictly increasing, and grows by more
    /// than `MIN_GROWTH_FACTOR` from run-length 3 upward.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = &self.score_table;
        if table[0] <= 0 {
            return Err(ConfigError::NonPositiveScore(table[0]));
        }
        for len in 2..=WIN_LENGTH {
            let (prev, cur) = (table[len - 2], table[len - 1]);
            if cur <= prev {
                return Err(ConfigError::ScoreNotIncreasing { len, prev, cur });
            }
            if len >= 3 && cur <= prev.saturating_mul(MIN_GROWTH_FACTOR) {
                return Err(ConfigError::ScoreGrowthTooSmall {
                    len,
                    factor: MIN_GROWTH_FACTOR,
                });
            }
        }
        if let Some(m) = self.defense_multipliers {
            if m.three < 1 || m.four < 1 {
                return Err(ConfigError::DefenseMultiplier {
                    three: m.three,
                    four: m.four,
                });
            }
        }
        Ok(())
    }
}
