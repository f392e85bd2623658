//! # chathub-history
//!
//! Bounded FIFO message history for ChatHub:
//!
//! - fixed-capacity in-memory ring of formatted message strings,
//! - oldest-entry eviction on overflow,
//! - optional append-only journal persistence (one line per message,
//!   replayed and compacted on startup).

pub mod buffer;
pub mod journal;
pub mod store;

pub use store::HistoryStore;
