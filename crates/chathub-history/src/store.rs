//! Thread-safe history store combining the ring buffer with the journal.

use std::sync::Mutex;

use tracing::{info, warn};

use chathub_core::AppResult;
use chathub_core::config::history::HistoryConfig;

use crate::buffer::RingBuffer;
use crate::journal::Journal;

/// Bounded, thread-safe, optionally-persisted message history.
///
/// All reads and writes go through one mutex so the in-memory append and
/// the journal write are a single critical section. A journal write
/// failure is logged and swallowed — the in-memory buffer stays
/// authoritative and keeps serving.
#[derive(Debug)]
pub struct HistoryStore {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    ring: RingBuffer,
    journal: Option<Journal>,
}

impl HistoryStore {
    /// Opens the store, replaying the journal when one is configured.
    pub fn open(config: &HistoryConfig) -> AppResult<Self> {
        let mut ring = RingBuffer::new(config.capacity);

        let journal = match &config.journal_path {
            Some(path) => {
                let (journal, replayed) = Journal::open(path, config.capacity)?;
                let count = replayed.len();
                for message in replayed {
                    ring.push(message);
                }
                info!(path = %journal.path().display(), count, "Replayed message journal");
                Some(journal)
            }
            None => None,
        };

        Ok(Self {
            state: Mutex::new(State { ring, journal }),
        })
    }

    /// An in-memory-only store, mainly for tests and journal-less setups.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                ring: RingBuffer::new(capacity),
                journal: None,
            }),
        }
    }

    /// Appends a message, evicting the oldest entry when full.
    ///
    /// The journal write happens while the lock is held, before returning,
    /// and only for messages the buffer actually retained.
    pub fn append(&self, message: &str) {
        let mut state = self.state.lock().expect("history lock poisoned");
        if !state.ring.push(message.to_string()) {
            return;
        }
        if let Some(journal) = state.journal.as_mut() {
            if let Err(e) = journal.append(message) {
                warn!(error = %e, "Journal append failed; history continues in memory");
            }
        }
    }

    /// Snapshot of the full history, oldest first.
    pub fn get_all(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("history lock poisoned")
            .ring
            .snapshot()
    }

    /// The most recent `k` entries (or fewer), oldest first.
    pub fn get_recent(&self, k: usize) -> Vec<String> {
        self.state
            .lock()
            .expect("history lock poisoned")
            .ring
            .recent(k)
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.state.lock().expect("history lock poisoned").ring.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_journal() -> String {
        std::env::temp_dir()
            .join(format!("chathub-store-{}.log", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn append_and_read_back() {
        let store = HistoryStore::in_memory(3);
        for m in ["a", "b", "c", "d"] {
            store.append(m);
        }
        assert_eq!(store.get_all(), vec!["b", "c", "d"]);
        assert_eq!(store.get_recent(2), vec!["c", "d"]);
    }

    #[test]
    fn zero_capacity_does_not_crash() {
        let store = HistoryStore::in_memory(0);
        store.append("dropped");
        assert!(store.is_empty());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn persists_across_reopen() {
        let path = temp_journal();
        let config = HistoryConfig {
            capacity: 10,
            replay_count: 50,
            journal_path: Some(path.clone()),
        };

        let store = HistoryStore::open(&config).unwrap();
        store.append("[09:00:00] alice: first");
        store.append("[09:00:01] bob: second");
        drop(store);

        let store = HistoryStore::open(&config).unwrap();
        assert_eq!(
            store.get_all(),
            vec!["[09:00:00] alice: first", "[09:00:01] bob: second"]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn reopen_with_smaller_capacity_keeps_tail() {
        let path = temp_journal();
        let config = HistoryConfig {
            capacity: 10,
            replay_count: 50,
            journal_path: Some(path.clone()),
        };

        let store = HistoryStore::open(&config).unwrap();
        for i in 0..5 {
            store.append(&format!("msg-{i}"));
        }
        drop(store);

        let small = HistoryConfig {
            capacity: 2,
            ..config
        };
        let store = HistoryStore::open(&small).unwrap();
        assert_eq!(store.get_all(), vec!["msg-3", "msg-4"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn concurrent_appends_stay_bounded() {
        use std::sync::Arc;

        let store = Arc::new(HistoryStore::in_memory(8));
        let mut handles = Vec::new();
        for t in 0..4 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    store.append(&format!("t{t}-{i}"));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
