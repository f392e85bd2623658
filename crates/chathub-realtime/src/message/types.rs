//! Inbound and outbound real-time message type definitions.
//!
//! The same outbound events feed both transports: the WebSocket handler
//! serializes them as tagged JSON, the SSE handler emits only the
//! `new_message` payloads as `data:` frames.

use serde::{Deserialize, Serialize};

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Post a chat message to the room.
    SendMessage {
        /// Raw message text; sanitized and formatted server-side.
        message: String,
    },
    /// Request a replay of the most recent history entries.
    GetHistory,
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// One formatted chat entry, pushed to all subscribers.
    NewMessage {
        /// Formatted `[HH:MM:SS] sender: body` line.
        message: String,
    },
    /// History replay, sent only to the requesting client.
    History {
        /// Formatted entries, oldest first.
        messages: Vec<String>,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}
