//! Cookie-backed session gateway.
//!
//! Associates an HTTP client with a username for the duration of a
//! browser session. Entries share the presence tracker's sliding TTL and
//! expire the same lazy way — nothing sweeps them, they are treated as
//! absent once stale.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use chathub_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// One active browser session.
#[derive(Debug, Clone)]
struct SessionEntry {
    username: String,
    last_seen: DateTime<Utc>,
}

/// Token → username store with a sliding TTL.
#[derive(Debug)]
pub struct SessionStore {
    entries: DashMap<Uuid, SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates a store with a TTL in minutes.
    pub fn new(idle_timeout_minutes: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::minutes(idle_timeout_minutes as i64),
        }
    }

    /// Creates a session for a logged-in username, returning the token.
    pub fn create(&self, username: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.entries.insert(
            token,
            SessionEntry {
                username: username.to_string(),
                last_seen: Utc::now(),
            },
        );
        token
    }

    /// Resolves a token to its username, refreshing the expiry.
    ///
    /// An expired entry is dropped and treated as absent.
    pub fn resolve(&self, token: &Uuid) -> Option<String> {
        let expired = {
            let mut entry = self.entries.get_mut(token)?;
            if Utc::now() - entry.last_seen > self.ttl {
                true
            } else {
                entry.last_seen = Utc::now();
                false
            }
        };
        if expired {
            self.entries.remove(token);
            return None;
        }
        self.entries.get(token).map(|e| e.username.clone())
    }

    /// Removes a session unconditionally, returning its username.
    pub fn remove(&self, token: &Uuid) -> Option<String> {
        self.entries.remove(token).map(|(_, e)| e.username)
    }

    /// Number of unexpired sessions.
    pub fn count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| Utc::now() - e.value().last_seen <= self.ttl)
            .count()
    }
}

/// The authenticated user behind a request.
///
/// Extraction fails with an authentication error when the session cookie
/// is missing, malformed, or expired. Page handlers that should redirect
/// instead use [`resolve_session`] directly.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Logged-in username.
    pub username: String,
    /// Session token from the cookie.
    pub token: Uuid,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::internal("cookie extraction failed"))?;

        let (token, username) = resolve_session(state, &jar)
            .ok_or_else(|| AppError::authentication("login required"))?;

        Ok(SessionUser { username, token })
    }
}

/// Resolves the session cookie in `jar`, touching presence on success.
pub fn resolve_session(state: &AppState, jar: &CookieJar) -> Option<(Uuid, String)> {
    let cookie = jar.get(&state.config.session.cookie_name)?;
    let token = Uuid::parse_str(cookie.value()).ok()?;
    let username = state.sessions.resolve(&token)?;
    state.engine.presence().touch(&username);
    Some((token, username))
}
