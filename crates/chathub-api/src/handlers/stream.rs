//! Server-sent-event stream transport.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use futures::stream;
use tracing::info;

use chathub_realtime::message::OutboundMessage;

use crate::session::SessionUser;
use crate::state::AppState;

/// GET /stream — one `data:` frame per message published after
/// subscription time.
///
/// The subscription guard travels inside the stream state, so a client
/// disconnect (the response future being dropped) unregisters the client
/// and ends its loop promptly.
pub async fn stream(
    State(state): State<AppState>,
    user: SessionUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (subscription, rx) = state.engine.subscribe(&user.username);
    info!(conn_id = %subscription.id(), username = %user.username, "SSE stream opened");

    let events = stream::unfold((rx, subscription), |(mut rx, subscription)| async move {
        loop {
            match rx.recv().await {
                Some(OutboundMessage::NewMessage { message }) => {
                    let event = Ok::<_, Infallible>(Event::default().data(message));
                    return Some((event, (rx, subscription)));
                }
                // Targeted events are WebSocket-only; skip them here.
                Some(_) => continue,
                None => return None,
            }
        }
    });

    Sse::new(events).keep_alive(
        KeepAlive::new().interval(Duration::from_secs(state.config.realtime.keepalive_seconds)),
    )
}
