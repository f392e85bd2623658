//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session cookie and expiry configuration.
///
/// The same sliding TTL governs both the cookie-backed session store and
/// the presence tracker, so a username frees up as soon as its session
/// goes idle long enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle timeout in minutes before a session (and the login it holds)
    /// is considered expired.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    30
}

fn default_cookie_name() -> String {
    "chathub_session".to_string()
}
