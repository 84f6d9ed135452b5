//! # nbwhisper backend
//!
//! Companion server for notebook WebRTC sessions. Serves static client
//! configuration (signaling URL, API keys, room modes) to the browser-side
//! notebook extension and proxies two Sora Cloud REST calls on its behalf,
//! injecting the bearer token server-side.
//!
//! ## Design Principles
//!
//! - **Immutable configuration**: loaded once at startup, injected into
//!   handlers, never mutated
//! - **Opaque vendor**: Sora Cloud responses are relayed, never parsed
//! - **No retries**: each request makes at most one vendor call
//! - **Minimal logging**: secret values are never logged
//!
//! ## API Overview
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/health` | GET | Health check (unauthenticated) |
//! | `/nbwhisper/get-example` | GET | Diagnostic no-op |
//! | `/nbwhisper/config` | GET | Current (Sora) client configuration |
//! | `/nbwhisper/v1/config` | GET | Legacy (SkyWay) client configuration |
//! | `/nbwhisper/create-access-token` | GET | Proxy vendor token issuance |
//! | `/nbwhisper/push-channel` | GET | Proxy vendor channel push |

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod sora;

pub use config::Config;
pub use handlers::AppState;
pub use sora::SoraClient;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Namespace prefix matching the browser extension's request paths.
pub const API_PREFIX: &str = "/nbwhisper";

/// Maximum request body size (16 KiB). All endpoints are GET; this only
/// guards against abuse.
pub const MAX_BODY_SIZE: usize = 16 * 1024;

/// Build the Axum router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/get-example", get(handlers::get_example))
        .route("/config", get(handlers::get_config))
        .route("/v1/config", get(handlers::get_config_v1))
        .route("/create-access-token", get(handlers::create_access_token))
        .route("/push-channel", get(handlers::push_channel));

    Router::new()
        // Health check (unauthenticated)
        .route("/health", get(handlers::health))
        // Extension API namespace (session token required)
        .nest(API_PREFIX, api)
        // Middleware stack (order matters: first added = outermost)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
