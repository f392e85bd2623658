//! Presence tracker — one active login per username, with lazy TTL expiry.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Tracks which usernames currently hold an active login.
///
/// Expiry is passive: entries are never swept, an expired entry is simply
/// treated as absent the next time it is checked. A name therefore frees
/// up (and can be taken over) the moment its TTL lapses.
#[derive(Debug)]
pub struct PresenceTracker {
    /// Username → last-seen instant.
    entries: DashMap<String, DateTime<Utc>>,
    /// Sliding time-to-live.
    ttl: Duration,
    /// Reserved display name of the AI responder; never loginable.
    reserved: String,
}

impl PresenceTracker {
    /// Creates a tracker with a TTL in minutes.
    pub fn new(idle_timeout_minutes: u64, reserved: impl Into<String>) -> Self {
        Self::with_ttl(Duration::minutes(idle_timeout_minutes as i64), reserved)
    }

    /// Creates a tracker with an explicit TTL.
    pub fn with_ttl(ttl: Duration, reserved: impl Into<String>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            reserved: reserved.into(),
        }
    }

    /// Attempts to log a username in.
    ///
    /// Rejects the empty string, the reserved AI name, and any username
    /// with an unexpired entry. On success the entry is created or
    /// refreshed.
    pub fn try_login(&self, username: &str) -> bool {
        if username.trim().is_empty() || username == self.reserved {
            return false;
        }
        match self.entries.entry(username.to_string()) {
            Entry::Occupied(mut occupied) => {
                if self.expired(*occupied.get()) {
                    occupied.insert(Utc::now());
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Utc::now());
                true
            }
        }
    }

    /// Refreshes the expiry of an active entry.
    pub fn touch(&self, username: &str) {
        if let Some(mut entry) = self.entries.get_mut(username) {
            *entry = Utc::now();
        }
    }

    /// Removes the entry unconditionally.
    pub fn logout(&self, username: &str) {
        self.entries.remove(username);
    }

    /// Whether the username holds an unexpired login.
    ///
    /// An expired entry is dropped on the way out.
    pub fn is_active(&self, username: &str) -> bool {
        let expired = match self.entries.get(username) {
            Some(entry) => self.expired(*entry),
            None => return false,
        };
        if expired {
            self.entries.remove(username);
            return false;
        }
        true
    }

    /// Snapshot of all usernames with unexpired entries.
    pub fn online_users(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !self.expired(*e.value()))
            .map(|e| e.key().clone())
            .collect()
    }

    /// Number of unexpired entries.
    pub fn online_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !self.expired(*e.value()))
            .count()
    }

    /// The reserved AI display name.
    pub fn reserved_name(&self) -> &str {
        &self.reserved
    }

    fn expired(&self, last_seen: DateTime<Utc>) -> bool {
        Utc::now() - last_seen > self.ttl
    }
}
