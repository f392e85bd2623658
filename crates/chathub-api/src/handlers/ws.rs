//! WebSocket transport.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use chathub_realtime::Subscription;
use chathub_realtime::message::{InboundMessage, OutboundMessage};

use crate::handlers::chat::post_user_message;
use crate::session::SessionUser;
use crate::state::AppState;

/// GET /ws — WebSocket upgrade; the session cookie authenticates it.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    user: SessionUser,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, user.username, socket))
}

/// Drives one established WebSocket connection.
async fn handle_socket(state: AppState, username: String, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (subscription, mut rx) = state.engine.subscribe(&username);
    let conn_id = subscription.id();

    info!(conn_id = %conn_id, username = %username, "WebSocket connection established");

    // Forward broadcast events to the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_string(&event) {
                Ok(p) => p,
                Err(_) => continue,
            };
            if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // Process inbound frames until the peer goes away.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => handle_frame(&state, &username, &subscription, &text),
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    drop(subscription);

    info!(conn_id = %conn_id, username = %username, "WebSocket connection closed");
}

/// Handles one inbound text frame.
fn handle_frame(state: &AppState, username: &str, subscription: &Subscription, raw: &str) {
    let msg: InboundMessage = match serde_json::from_str(raw) {
        Ok(m) => m,
        Err(e) => {
            subscription.send(OutboundMessage::Error {
                code: "INVALID_MESSAGE".to_string(),
                message: format!("failed to parse message: {e}"),
            });
            return;
        }
    };

    match msg {
        InboundMessage::SendMessage { message } => {
            if message.trim().is_empty() {
                return;
            }
            post_user_message(state, username, &message);
        }
        InboundMessage::GetHistory => {
            subscription.send(OutboundMessage::History {
                messages: state.engine.replay(),
            });
        }
    }
}
