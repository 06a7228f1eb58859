use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::util::{SPOILER_ROUNDS, SPOILER_WINDOW, THRESH_OUTLIER, WARMUP_ITERATIONS};

/// Errors that can occur when loading a sweep configuration.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

/// Parameters of a SPOILER sweep.
///
/// Missing fields in a JSON file fall back to the defaults, so a config only needs to
/// name what it overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Number of preceding pages written before each timed probe. The first `window`
    /// pages of the buffer are never measured.
    pub window: usize,
    /// Timed rounds per page. Also the denominator of the raw mean used for the diffs.
    pub rounds: usize,
    /// Rounds measuring this many cycles or more are discarded.
    pub outlier_threshold: u32,
    /// No-op iterations executed once at the start of each sweep.
    pub warmup_iterations: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            window: SPOILER_WINDOW,
            rounds: SPOILER_ROUNDS,
            outlier_threshold: THRESH_OUTLIER,
            warmup_iterations: WARMUP_ITERATIONS,
        }
    }
}

impl SweepConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn from_jsonfile(filepath: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut file = File::open(filepath)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}
