//! nbwhisper backend - notebook WebRTC companion server
//!
//! Serves client configuration for the browser-side notebook extension and
//! proxies Sora Cloud token-issuance and channel-push calls.

use nbwhisper_backend::{build_router, AppState, Config};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize structured logging
    init_tracing();

    // Load configuration
    let config = Config::from_env();
    log_startup_info(&config);

    let state = AppState::new(Arc::new(config.clone()));

    // Build and serve the application
    let app = build_router(state);
    serve(app, &config).await;
}

/// Initialize tracing with environment-based log levels.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nbwhisper_backend=debug,tower_http=info")),
        )
        .init();
}

/// Log startup configuration (no secrets).
fn log_startup_info(config: &Config) {
    if !config.auth_enabled() {
        tracing::warn!("SERVICE_TOKEN not set - server runs without authentication");
    }

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        auth_enabled = config.auth_enabled(),
        signaling_url = %config.signaling_url,
        sora_api_base = %config.sora_api_base,
        api_key_set = !config.api_key.is_empty(),
        skyway_token_set = !config.skyway_api_token.is_empty(),
        waiting_room_mode = config.room_mode_for_waiting_room.as_str(),
        talking_room_mode = config.room_mode_for_talking_room.as_str(),
        "Starting nbwhisper backend"
    );
}

/// Bind to address and serve the application.
async fn serve(app: axum::Router, config: &Config) {
    let bind_addr = format!("{}:{}", config.bind_addr, config.port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %bind_addr, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}
