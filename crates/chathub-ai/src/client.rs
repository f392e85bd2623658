//! Completion API client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use chathub_core::config::ai::AiConfig;
use chathub_core::{AppError, AppResult};

use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Seam for the upstream completion call, so the responder can be tested
/// without a network.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Sends one prompt and returns the assistant reply text.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

/// reqwest-backed client for an OpenAI-style chat completions endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    /// Builds a client from configuration.
    pub fn new(config: &AiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::external(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionApi for CompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        debug!(model = %self.model, "Sending completion request");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external(format!(
                "completion API returned {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::external(format!("malformed completion response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::external("completion response held no choices"))
    }
}
