//! Engine configuration
//!
//! Loaded from JSON or built in code; the CLI overrides individual fields.
//!
//! ```json
//! {
//!   "search_radius": 2,
//!   "max_search_candidates": 60,
//!   "score_table": [10, 100, 1000, 10000, 1000000],
//!   "defense_multipliers": { "three": 2, "four": 3 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::eval::PatternWeights;

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("search radius must be at least 1")]
    ZeroRadius,

    #[error("score for run-length 1 must be positive, got {0}")]
    NonPositiveScore(i64),

    #[error("score for run-length {len} ({cur}) must exceed the previous one ({prev})")]
    ScoreNotIncreasing { len: usize, prev: i64, cur: i64 },

    #[error("score for run-length {len} must be more than {factor}x the previous one")]
    ScoreGrowthTooSmall { len: usize, factor: i64 },

    #[error("defense multipliers must be at least 1, got three={three} four={four}")]
    DefenseMultiplier { three: i64, four: i64 },

    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tuning knobs for the move selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cells a candidate may lie beyond the stones' bounding box
    pub search_radius: usize,
    /// Largest candidate count still searched two plies deep; 0 disables lookahead
    pub max_search_candidates: usize,
    #[serde(flatten)]
    pub weights: PatternWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius: 2,
            max_search_candidates: 60,
            weights: PatternWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }
        self.weights.validate()
    }

    /// Read and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}
