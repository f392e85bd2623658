//! Username presence tracking.

pub mod tracker;

pub use tracker::PresenceTracker;
