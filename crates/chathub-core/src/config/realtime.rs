//! Real-time fan-out configuration.

use serde::{Deserialize, Serialize};

/// Real-time fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-client outbound buffer size. A client that falls this many
    /// events behind starts losing messages.
    #[serde(default = "default_client_buffer")]
    pub client_buffer_size: usize,
    /// SSE keep-alive comment interval in seconds.
    #[serde(default = "default_keepalive")]
    pub keepalive_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            client_buffer_size: default_client_buffer(),
            keepalive_seconds: default_keepalive(),
        }
    }
}

fn default_client_buffer() -> usize {
    256
}

fn default_keepalive() -> u64 {
    15
}
