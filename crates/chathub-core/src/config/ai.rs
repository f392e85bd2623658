//! AI responder configuration.

use serde::{Deserialize, Serialize};

/// AI responder configuration.
///
/// The endpoint is any OpenAI-style chat completions API. The API key is
/// normally supplied via the `CHATHUB_AI__API_KEY` environment variable
/// rather than the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Whether the AI responder is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Completion API endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Display name the responder posts under. Reserved: users cannot
    /// log in with this name.
    #[serde(default = "default_display_name")]
    pub display_name: String,
    /// Message prefix that triggers the responder.
    #[serde(default = "default_trigger")]
    pub trigger_prefix: String,
    /// Number of worker tasks draining the job queue.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Maximum queued jobs before new requests are rejected.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Upstream request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            display_name: default_display_name(),
            trigger_prefix: default_trigger(),
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_display_name() -> String {
    "AI".to_string()
}

fn default_trigger() -> String {
    "@ai".to_string()
}

fn default_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    32
}

fn default_request_timeout() -> u64 {
    30
}
