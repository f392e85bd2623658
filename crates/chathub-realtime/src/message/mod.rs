//! Wire message types for the real-time channel.

pub mod types;

pub use types::{InboundMessage, OutboundMessage};
