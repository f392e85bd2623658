//! Application state shared across all handlers.

use std::sync::Arc;

use chathub_ai::AiResponder;
use chathub_core::config::AppConfig;
use chathub_realtime::ChatEngine;

use crate::session::SessionStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Chat engine (history + broadcast + presence).
    pub engine: ChatEngine,
    /// Cookie-backed session store.
    pub sessions: Arc<SessionStore>,
    /// AI responder, when enabled.
    pub ai: Option<Arc<AiResponder>>,
}
