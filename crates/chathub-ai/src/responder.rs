//! Bounded worker pool turning trigger messages into AI chat replies.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

use chathub_core::config::ai::AiConfig;
use chathub_core::text;
use chathub_realtime::ChatEngine;

use crate::client::CompletionApi;

/// Fixed marker included in every failure reply body.
pub const FAILURE_MARKER: &str = "[ai unavailable]";

/// Strips the trigger prefix from a message.
///
/// Returns the remaining prompt when the message starts with the prefix
/// followed by whitespace (or nothing), `None` otherwise.
pub fn extract_prompt<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = message.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix(char::is_whitespace).map(str::trim)
}

/// Queues prompts for a fixed pool of reply workers.
///
/// `submit` never blocks the triggering request. A full queue is itself
/// answered with a failure reply rather than growing unboundedly, and an
/// in-flight call is not cancelled when the triggering session ends.
pub struct AiResponder {
    queue: mpsc::Sender<String>,
    display_name: String,
}

impl AiResponder {
    /// Spawns the worker pool and returns the responder handle.
    pub fn spawn(config: &AiConfig, api: Arc<dyn CompletionApi>, engine: ChatEngine) -> Arc<Self> {
        let (tx, rx) = mpsc::channel::<String>(config.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        let workers = config.workers.max(1);
        for worker in 0..workers {
            let rx = Arc::clone(&rx);
            let api = Arc::clone(&api);
            let engine = engine.clone();
            let display_name = config.display_name.clone();
            tokio::spawn(async move {
                loop {
                    let job = rx.lock().await.recv().await;
                    let Some(prompt) = job else {
                        break;
                    };
                    let body = match api.complete(&prompt).await {
                        Ok(reply) => reply,
                        Err(e) => {
                            warn!(worker, error = %e, "Completion call failed");
                            format!("{FAILURE_MARKER} {}", e.message)
                        }
                    };
                    engine.post(text::format_chat(&display_name, &body));
                }
            });
        }

        info!(workers, "AI responder started");

        Arc::new(Self {
            queue: tx,
            display_name: config.display_name.clone(),
        })
    }

    /// Enqueues a prompt without blocking.
    ///
    /// When the queue is full the overload is reported as a reply so the
    /// request is never silently dropped.
    pub fn submit(&self, prompt: String, engine: &ChatEngine) {
        if let Err(e) = self.queue.try_send(prompt) {
            warn!(error = %e, "AI queue full, rejecting prompt");
            engine.post(text::format_chat(
                &self.display_name,
                &format!("{FAILURE_MARKER} too many requests in flight, try again shortly"),
            ));
        }
    }
}
