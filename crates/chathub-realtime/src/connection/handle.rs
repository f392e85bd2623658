//! Individual client connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::OutboundMessage;

/// Unique connection identifier.
pub type ClientId = Uuid;

/// A handle to one connected client (WebSocket or SSE).
///
/// Holds the bounded sender for pushing events to the client plus the
/// username it belongs to. The handle never owns history — it is a
/// read-only subscriber.
#[derive(Debug)]
pub struct ClientHandle {
    /// Unique connection ID.
    pub id: ClientId,
    /// Username the connection belongs to.
    pub username: String,
    /// Sender for outbound events.
    sender: mpsc::Sender<OutboundMessage>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ClientHandle {
    /// Creates a new handle around a bounded sender.
    pub fn new(username: String, sender: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Enqueues an event for this client without blocking.
    ///
    /// A full buffer drops the event (slow client); a closed channel marks
    /// the handle dead. Returns whether the event was enqueued.
    pub fn send(&self, event: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Client buffer full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Whether the connection is still alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection as dead; subsequent sends are no-ops.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
