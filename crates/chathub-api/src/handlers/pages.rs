//! Page handlers — chat view, login, logout.
//!
//! These render HTML and redirect rather than returning JSON errors, so
//! they resolve the session by hand instead of using the extractor.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::info;
use validator::Validate;

use chathub_core::text;

use crate::dto::LoginForm;
use crate::session::resolve_session;
use crate::state::AppState;
use crate::views;

/// GET / — the chat page; redirects to the login form without a session.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
    match resolve_session(&state, &jar) {
        Some((_, username)) => Html(views::chat_page(&username)).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

/// GET /login — the login form; redirects home when already logged in.
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if resolve_session(&state, &jar).is_some() {
        return Redirect::to("/").into_response();
    }
    Html(views::login_page(None)).into_response()
}

/// POST /login — validates the username, claims it, starts the session.
///
/// Every rejection re-renders the form with a retryable message; nothing
/// here is fatal.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if resolve_session(&state, &jar).is_some() {
        return Redirect::to("/").into_response();
    }

    if form.validate().is_err() {
        return Html(views::login_page(Some("username must be 1-32 characters"))).into_response();
    }

    let username = form.user.trim().to_string();
    if username.is_empty() || username.contains(['<', '>']) {
        return Html(views::login_page(Some("that username is not allowed"))).into_response();
    }

    if !state.engine.presence().try_login(&username) {
        return Html(views::login_page(Some(
            "that name is reserved or already in the room",
        )))
        .into_response();
    }

    let token = state.sessions.create(&username);
    state
        .engine
        .post(text::format_system(&format!("{username} joined the room")));

    info!(username = %username, "User logged in");

    let cookie = Cookie::build((state.config.session.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .build();

    (jar.add(cookie), Redirect::to("/")).into_response()
}

/// GET /logout — clears the session and announces the departure.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some((token, username)) = resolve_session(&state, &jar) {
        state.sessions.remove(&token);
        state.engine.presence().logout(&username);
        state
            .engine
            .post(text::format_system(&format!("{username} left the room")));
        info!(username = %username, "User logged out");
    }

    let removal = Cookie::build((state.config.session.cookie_name.clone(), ""))
        .path("/")
        .build();

    (jar.remove(removal), Redirect::to("/login")).into_response()
}
