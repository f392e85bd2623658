//! Message history buffer configuration.

use serde::{Deserialize, Serialize};

/// Message history buffer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of messages retained in memory. The oldest entry
    /// is evicted when the buffer is full.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Number of recent entries replayed to a client on `get_history`.
    #[serde(default = "default_replay_count")]
    pub replay_count: usize,
    /// Path to the append-only journal file. Persistence is disabled
    /// when unset.
    #[serde(default)]
    pub journal_path: Option<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            replay_count: default_replay_count(),
            journal_path: None,
        }
    }
}

fn default_capacity() -> usize {
    9999
}

fn default_replay_count() -> usize {
    50
}
