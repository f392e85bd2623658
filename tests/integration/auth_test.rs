//! Integration tests for the login/logout flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn index_redirects_without_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn login_sets_cookie_and_announces_join() {
    let app = TestApp::new();

    let cookie = app.login("alice").await;
    assert!(cookie.starts_with(&app.config.session.cookie_name));

    let history = app.engine.history();
    assert_eq!(history.len(), 1);
    assert!(history[0].contains("alice joined the room"), "{history:?}");

    // The chat page now renders for this session.
    let response = app.request("GET", "/", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("alice"));
}

#[tokio::test]
async fn duplicate_login_is_rejected() {
    let app = TestApp::new();
    app.login("alice").await;

    let response = app
        .request("POST", "/login", Some(&[("user", "alice")]), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("already in the room"), "{}", response.body);
}

#[tokio::test]
async fn empty_username_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/login", Some(&[("user", "")]), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("1-32 characters"), "{}", response.body);

    let response = app
        .request("POST", "/login", Some(&[("user", "   ")]), None)
        .await;
    assert!(response.body.contains("not allowed"), "{}", response.body);
}

#[tokio::test]
async fn reserved_ai_name_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/login", Some(&[("user", "AI")]), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("reserved"), "{}", response.body);
}

#[tokio::test]
async fn logout_clears_the_session_and_frees_the_name() {
    let app = TestApp::new();
    let cookie = app.login("bob").await;

    let response = app.request("GET", "/logout", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let history = app.engine.history();
    assert!(
        history.iter().any(|m| m.contains("bob left the room")),
        "{history:?}"
    );

    // The old cookie no longer authenticates.
    let response = app.request("GET", "/", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    // And the name can be claimed again.
    app.login("bob").await;
}
