//! Chat message submission, shared by the HTTP and WebSocket paths.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use chathub_ai::extract_prompt;
use chathub_core::{AppError, text};

use crate::dto::SendForm;
use crate::error::ApiError;
use crate::session::SessionUser;
use crate::state::AppState;

/// POST /send — formats and publishes one chat message.
pub async fn send(
    State(state): State<AppState>,
    user: SessionUser,
    Form(form): Form<SendForm>,
) -> Result<StatusCode, ApiError> {
    form.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    post_user_message(&state, &user.username, &form.message);
    Ok(StatusCode::NO_CONTENT)
}

/// The one path every user message takes: format, append + broadcast,
/// then schedule the AI responder when the trigger prefix matches.
///
/// The user's message is in history before the AI job is queued, so the
/// reply always lands strictly after it.
pub fn post_user_message(state: &AppState, username: &str, raw: &str) {
    state.engine.post(text::format_chat(username, raw));

    if let Some(ai) = &state.ai {
        if let Some(prompt) = extract_prompt(raw, &state.config.ai.trigger_prefix) {
            if !prompt.is_empty() {
                ai.submit(prompt.to_string(), &state.engine);
            }
        }
    }
}
