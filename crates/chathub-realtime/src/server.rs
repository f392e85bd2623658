//! The chat engine — the single append-then-publish path.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use chathub_core::config::realtime::RealtimeConfig;
use chathub_history::HistoryStore;

use crate::connection::handle::{ClientHandle, ClientId};
use crate::connection::pool::ClientPool;
use crate::message::OutboundMessage;
use crate::presence::tracker::PresenceTracker;

/// Central chat engine shared by every transport and the AI responder.
///
/// The engine owns the only path that mutates message history: `post`
/// appends to the [`HistoryStore`] and then fans the entry out to every
/// connected client. Constructed once at process start and passed around
/// as an `Arc` — no other component touches history or presence directly.
#[derive(Debug, Clone)]
pub struct ChatEngine {
    history: Arc<HistoryStore>,
    presence: Arc<PresenceTracker>,
    pool: Arc<ClientPool>,
    client_buffer_size: usize,
    replay_count: usize,
}

impl ChatEngine {
    /// Creates a new engine around the shared history and presence state.
    pub fn new(
        history: Arc<HistoryStore>,
        presence: Arc<PresenceTracker>,
        config: &RealtimeConfig,
        replay_count: usize,
    ) -> Self {
        info!("Chat engine initialized");
        Self {
            history,
            presence,
            pool: Arc::new(ClientPool::new()),
            client_buffer_size: config.client_buffer_size.max(1),
            replay_count,
        }
    }

    /// Appends a formatted message to history and broadcasts it.
    ///
    /// The append (including its journal write) completes before the
    /// fan-out starts, so history order is the display order every
    /// subscriber observes.
    pub fn post(&self, message: String) {
        self.history.append(&message);
        self.publish(OutboundMessage::NewMessage { message });
    }

    /// Delivers an event to every live client, at most once each.
    ///
    /// Slow clients lose the event (bounded buffers); disconnected clients
    /// are pruned from the pool. Never fails.
    pub fn publish(&self, event: OutboundMessage) {
        let mut delivered = 0usize;
        for handle in self.pool.all() {
            if handle.send(event.clone()) {
                delivered += 1;
            } else if !handle.is_alive() {
                self.pool.remove(&handle.id);
            }
        }
        debug!(delivered, "Broadcast event");
    }

    /// Registers a new client and returns its subscription plus the
    /// receiving end of its event buffer.
    pub fn subscribe(&self, username: &str) -> (Subscription, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.client_buffer_size);
        let handle = Arc::new(ClientHandle::new(username.to_string(), tx));
        self.pool.add(handle.clone());

        debug!(conn_id = %handle.id, username, "Client subscribed");

        (
            Subscription {
                handle,
                pool: Arc::clone(&self.pool),
            },
            rx,
        )
    }

    /// The most recent `replay_count` history entries, oldest first.
    pub fn replay(&self) -> Vec<String> {
        self.history.get_recent(self.replay_count)
    }

    /// Read-through to the full history snapshot.
    pub fn history(&self) -> Vec<String> {
        self.history.get_all()
    }

    /// Number of retained history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Shared presence tracker.
    pub fn presence(&self) -> &Arc<PresenceTracker> {
        &self.presence
    }

    /// Number of connected clients.
    pub fn connection_count(&self) -> usize {
        self.pool.count()
    }

    /// Drops every client handle so transport loops wind down.
    pub fn shutdown(&self) {
        for handle in self.pool.all() {
            handle.mark_dead();
            self.pool.remove(&handle.id);
        }
        info!("Chat engine shut down");
    }
}

/// RAII registration of one connected client.
///
/// Dropping the subscription (the transport future ending, for SSE and
/// WebSocket alike) unregisters the client, so a disconnect can never
/// leak a pool entry.
#[derive(Debug)]
pub struct Subscription {
    handle: Arc<ClientHandle>,
    pool: Arc<ClientPool>,
}

impl Subscription {
    /// Connection ID of this client.
    pub fn id(&self) -> ClientId {
        self.handle.id
    }

    /// Sends an event to this client only (history replays, errors).
    pub fn send(&self, event: OutboundMessage) -> bool {
        self.handle.send(event)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.mark_dead();
        self.pool.remove(&self.handle.id);
        debug!(conn_id = %self.handle.id, "Client unsubscribed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(capacity: usize, buffer: usize) -> ChatEngine {
        let history = Arc::new(HistoryStore::in_memory(capacity));
        let presence = Arc::new(PresenceTracker::new(30, "AI"));
        let config = RealtimeConfig {
            client_buffer_size: buffer,
            keepalive_seconds: 15,
        };
        ChatEngine::new(history, presence, &config, 50)
    }

    fn payload(event: OutboundMessage) -> String {
        match event {
            OutboundMessage::NewMessage { message } => message,
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn post_appends_and_broadcasts() {
        let engine = engine_with(100, 8);
        let (_sub, mut rx) = engine.subscribe("alice");

        engine.post("[10:00:00] alice: hi".to_string());

        assert_eq!(payload(rx.recv().await.unwrap()), "[10:00:00] alice: hi");
        assert_eq!(engine.history(), vec!["[10:00:00] alice: hi"]);
    }

    #[tokio::test]
    async fn per_client_order_is_fifo() {
        let engine = engine_with(100, 8);
        let (_sub, mut rx) = engine.subscribe("alice");

        engine.post("first".to_string());
        engine.post("second".to_string());

        assert_eq!(payload(rx.recv().await.unwrap()), "first");
        assert_eq!(payload(rx.recv().await.unwrap()), "second");
    }

    #[tokio::test]
    async fn publish_after_disconnect_does_not_fail() {
        let engine = engine_with(100, 8);

        let (sub, mut rx) = engine.subscribe("alice");
        engine.post("hello".to_string());
        assert_eq!(payload(rx.recv().await.unwrap()), "hello");

        drop(sub);
        drop(rx);

        // No subscriber left; must not panic and must not deliver.
        engine.post("world".to_string());
        assert_eq!(engine.connection_count(), 0);
        assert_eq!(engine.history(), vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn dead_receiver_is_pruned_on_publish() {
        let engine = engine_with(100, 8);

        let (_sub, rx) = engine.subscribe("alice");
        drop(rx);
        assert_eq!(engine.connection_count(), 1);

        engine.post("ping".to_string());
        assert_eq!(engine.connection_count(), 0);
    }

    #[tokio::test]
    async fn slow_client_loses_events_without_blocking() {
        let engine = engine_with(100, 1);
        let (_sub, mut rx) = engine.subscribe("slow");

        engine.post("one".to_string());
        engine.post("two".to_string());
        engine.post("three".to_string());

        // Buffer of one: the first event is retained, the rest dropped.
        assert_eq!(payload(rx.recv().await.unwrap()), "one");
        assert!(rx.try_recv().is_err());

        // History is unaffected by the slow client.
        assert_eq!(engine.history_len(), 3);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_client_once() {
        let engine = engine_with(100, 8);
        let (_s1, mut rx1) = engine.subscribe("alice");
        let (_s2, mut rx2) = engine.subscribe("bob");

        engine.post("hello".to_string());

        assert_eq!(payload(rx1.recv().await.unwrap()), "hello");
        assert_eq!(payload(rx2.recv().await.unwrap()), "hello");
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn subscription_send_targets_one_client() {
        let engine = engine_with(100, 8);
        let (sub, mut rx) = engine.subscribe("alice");
        let (_other, mut other_rx) = engine.subscribe("bob");

        sub.send(OutboundMessage::History {
            messages: vec!["old".to_string()],
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            OutboundMessage::History { .. }
        ));
        assert!(other_rx.try_recv().is_err());
    }
}
