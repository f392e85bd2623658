//! # chathub-ai
//!
//! AI responder for ChatHub. Messages carrying the configured trigger
//! prefix are queued to a bounded worker pool; workers call an
//! OpenAI-style chat completions API and post the reply back through the
//! chat engine under the reserved display name. Every failure mode still
//! produces a visible chat message — the responder never crashes a
//! caller and never silently drops a request.

pub mod client;
pub mod responder;
pub mod types;

pub use client::{CompletionApi, CompletionClient};
pub use responder::{AiResponder, FAILURE_MARKER, extract_prompt};
