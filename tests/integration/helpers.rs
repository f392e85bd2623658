//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use tower::ServiceExt;

use chathub_api::router::build_router;
use chathub_api::session::SessionStore;
use chathub_api::state::AppState;
use chathub_core::config::AppConfig;
use chathub_history::HistoryStore;
use chathub_realtime::{ChatEngine, PresenceTracker};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The chat engine, for asserting on history and subscriptions
    pub engine: ChatEngine,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a new test application with an in-memory history and no AI.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.history.capacity = 100;
        config.ai.enabled = false;

        let history = Arc::new(HistoryStore::in_memory(config.history.capacity));
        let presence = Arc::new(PresenceTracker::new(
            config.session.idle_timeout_minutes,
            config.ai.display_name.clone(),
        ));
        let engine = ChatEngine::new(
            history,
            presence,
            &config.realtime,
            config.history.replay_count,
        );
        let sessions = Arc::new(SessionStore::new(config.session.idle_timeout_minutes));
        let config = Arc::new(config);

        let state = AppState {
            config: Arc::clone(&config),
            engine: engine.clone(),
            sessions,
            ai: None,
        };

        Self {
            router: build_router(state),
            engine,
            config,
        }
    }

    /// Log a username in and return the session cookie (`name=token`).
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .request("POST", "/login", Some(&[("user", username)]), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::SEE_OTHER,
            "Login failed: {}",
            response.body
        );

        let set_cookie = response.set_cookie.expect("No session cookie in response");
        set_cookie
            .split(';')
            .next()
            .expect("Malformed Set-Cookie header")
            .to_string()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        form: Option<&[(&str, &str)]>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match form {
            Some(fields) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(encode_form(fields))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = header_string(&response, header::SET_COOKIE);
        let location = header_string(&response, header::LOCATION);

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            set_cookie,
            location,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }
}

fn header_string(
    response: &axum::response::Response,
    name: header::HeaderName,
) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
    /// `Location` header, if any
    pub location: Option<String>,
    /// Response body as text
    pub body: String,
}
