//! ChatHub Server — minimal multi-user chat room
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use chathub_ai::{AiResponder, CompletionClient};
use chathub_api::session::SessionStore;
use chathub_api::state::AppState;
use chathub_core::config::AppConfig;
use chathub_core::error::AppError;
use chathub_history::HistoryStore;
use chathub_realtime::{ChatEngine, PresenceTracker};

#[tokio::main]
async fn main() {
    let env = std::env::var("CHATHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ChatHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Message history (replays the journal if configured) ──
    let history = Arc::new(HistoryStore::open(&config.history)?);
    tracing::info!(entries = history.len(), "Message history ready");

    // ── Step 2: Presence + chat engine ───────────────────────────────
    let presence = Arc::new(PresenceTracker::new(
        config.session.idle_timeout_minutes,
        config.ai.display_name.clone(),
    ));
    let engine = ChatEngine::new(
        Arc::clone(&history),
        Arc::clone(&presence),
        &config.realtime,
        config.history.replay_count,
    );

    // ── Step 3: AI responder ─────────────────────────────────────────
    let ai = if config.ai.enabled {
        let client = Arc::new(CompletionClient::new(&config.ai)?);
        let responder = AiResponder::spawn(&config.ai, client, engine.clone());
        tracing::info!(model = %config.ai.model, "AI responder enabled");
        Some(responder)
    } else {
        tracing::info!("AI responder disabled");
        None
    };

    // ── Step 4: Session store + HTTP server ──────────────────────────
    let sessions = Arc::new(SessionStore::new(config.session.idle_timeout_minutes));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState {
        config: Arc::new(config),
        engine: engine.clone(),
        sessions,
        ai,
    };

    let app = chathub_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("ChatHub server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    engine.shutdown();
    tracing::info!("ChatHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
