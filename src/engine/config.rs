//! Session defaults.

use crate::board::search::{DEFAULT_DEPTH, MAX_DEPTH};
use crate::tt::DEFAULT_TT_MB;

/// Largest hash size accepted from a front end, in MB
pub const MAX_HASH_MB: usize = 512;

/// Settings a session starts with. Command-line arguments override them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table size in MB. Zero disables the table.
    pub hash_mb: usize,
    /// Depth searched when a request carries no limit
    pub default_depth: u32,
    /// Depth cap for infinite and time-limited searches
    pub max_depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hash_mb: DEFAULT_TT_MB,
            default_depth: DEFAULT_DEPTH,
            max_depth: MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_hash_mb(mut self, hash_mb: usize) -> Self {
        self.hash_mb = hash_mb.min(MAX_HASH_MB);
        self
    }
}
