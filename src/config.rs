use serde::{Deserialize, Serialize};

/// Default number of instances at which batch work moves onto the rayon pool.
const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// Batch construction configuration.
///
/// Only affects how work is scheduled; proofs are identical for a given RNG stream
/// whatever the settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Batches with at least this many instances compute commitments and responses
    /// in parallel. `0` always parallelizes.
    pub parallel_threshold: usize,
}

impl BatchConfig {
    /// Creates a configuration with the given parallel threshold.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns `true` if a batch of `len` instances should run in parallel.
    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}
