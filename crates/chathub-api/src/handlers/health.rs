//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /api/health — liveness plus a few gauges.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "connections": state.engine.connection_count(),
        "online_users": state.engine.presence().online_count(),
        "history_entries": state.engine.history_len(),
    }))
}
