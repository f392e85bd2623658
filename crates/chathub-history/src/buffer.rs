//! Fixed-capacity FIFO ring of formatted message strings.
//!
//! Not synchronized — [`crate::store::HistoryStore`] owns the lock so the
//! in-memory append and the journal write happen under the same critical
//! section.

use std::collections::VecDeque;

/// Fixed-capacity FIFO buffer. Insertion order is display order.
#[derive(Debug)]
pub struct RingBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    /// Creates an empty buffer with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends a message to the tail, evicting the head when full.
    ///
    /// Returns `false` when the message was not retained (capacity 0).
    pub fn push(&mut self, message: String) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
        true
    }

    /// Snapshot of all entries, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// The final `k` entries (or fewer), oldest first.
    pub fn recent(&self, k: usize) -> Vec<String> {
        let skip = self.entries.len().saturating_sub(k);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
