//! Integration tests for message submission and broadcast.

use http::StatusCode;

use chathub_realtime::message::OutboundMessage;

use crate::helpers::TestApp;

#[tokio::test]
async fn send_requires_a_session() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/send", Some(&[("message", "hi")]), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn send_appends_a_formatted_message() {
    let app = TestApp::new();
    let cookie = app.login("carol").await;

    let response = app
        .request("POST", "/send", Some(&[("message", "hello room")]), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let history = app.engine.history();
    let last = history.last().expect("history is empty");
    assert!(last.contains("carol: hello room"), "{last}");
    assert!(last.starts_with('['), "{last}");
}

#[tokio::test]
async fn script_content_is_never_delivered_verbatim() {
    let app = TestApp::new();
    let cookie = app.login("mallory").await;

    app.request(
        "POST",
        "/send",
        Some(&[("message", "<script>alert('xss')</script>hi")]),
        Some(&cookie),
    )
    .await;

    let history = app.engine.history();
    let last = history.last().expect("history is empty");
    assert!(!last.contains("<script>"), "{last}");
    assert!(!last.contains("alert"), "{last}");
    assert!(last.contains("mallory: hi"), "{last}");
}

#[tokio::test]
async fn send_broadcasts_to_subscribers() {
    let app = TestApp::new();
    let cookie = app.login("dave").await;

    let (_subscription, mut rx) = app.engine.subscribe("watcher");

    app.request("POST", "/send", Some(&[("message", "ping")]), Some(&cookie))
        .await;

    match rx.recv().await.expect("no event delivered") {
        OutboundMessage::NewMessage { message } => {
            assert!(message.contains("dave: ping"), "{message}")
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = TestApp::new();
    let cookie = app.login("erin").await;

    let response = app
        .request("POST", "/send", Some(&[("message", "")]), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    // Only the join announcement is in history.
    assert_eq!(app.engine.history().len(), 1);
}
