//! # chathub-realtime
//!
//! Real-time core for ChatHub. Provides:
//!
//! - Client connection handles with bounded per-client buffers
//! - At-most-once broadcast fan-out with FIFO ordering per client
//! - Username presence tracking with lazy TTL expiry
//! - The [`ChatEngine`] append-then-publish path shared by every transport

pub mod connection;
pub mod message;
pub mod presence;
pub mod server;

pub use connection::pool::ClientPool;
pub use presence::tracker::PresenceTracker;
pub use server::{ChatEngine, Subscription};
