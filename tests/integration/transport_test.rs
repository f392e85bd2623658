//! Integration tests for the transports and the health endpoint.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn stream_requires_a_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/stream", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ws_upgrade_requires_a_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/ws", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_status_and_gauges() {
    let app = TestApp::new();
    app.login("alice").await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_str(&response.body).expect("health body is not JSON");
    assert_eq!(body.get("status").unwrap().as_str().unwrap(), "ok");
    assert_eq!(body.get("online_users").unwrap().as_u64().unwrap(), 1);
    // The join announcement is already in history.
    assert_eq!(body.get("history_entries").unwrap().as_u64().unwrap(), 1);
}
