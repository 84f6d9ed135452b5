//! HTTP request handlers for the nbwhisper API.
//!
//! All handlers follow the contract:
//! - Every route under the API namespace requires the session token
//! - Vendor non-success statuses are data, not errors
//! - No secrets are logged

use crate::auth::{self, AuthError};
use crate::config::Config;
use crate::models::*;
use crate::sora::SoraClient;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Environment variable carrying the host-assigned username.
/// Read per-request so a hub-managed deployment can swap users without a
/// restart.
pub const USERNAME_ENV_VAR: &str = "JUPYTERHUB_USER";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sora: SoraClient,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let sora = SoraClient::new(config.sora_api_base.clone());
        Self { config, sora }
    }
}

/// Resolve the username for a request: host override wins, else the
/// configured default. Presence of the variable counts, even when empty.
fn resolve_username(config: &Config) -> String {
    std::env::var(USERNAME_ENV_VAR).unwrap_or_else(|_| config.default_username.clone())
}

// === Health Check ===

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// === Diagnostic Endpoint ===

/// GET /nbwhisper/get-example - Diagnostic no-op confirming the extension
/// routes are mounted
pub async fn get_example(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ExampleResponse>, ApiError> {
    auth::authorize(&state.config, &headers)?;

    Ok(Json(ExampleResponse {
        data: "This is /nbwhisper/get-example endpoint!".to_string(),
    }))
}

// === Configuration ===

/// GET /nbwhisper/config - Current (Sora) configuration shape
pub async fn get_config(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConfigResponse>, ApiError> {
    auth::authorize(&state.config, &headers)?;

    let config = &state.config;
    Ok(Json(ConfigResponse {
        username: resolve_username(config),
        api_key: config.api_key.clone(),
        signaling_url: config.signaling_url.clone(),
        channel_id_prefix: config.channel_id_prefix.clone(),
        channel_id_suffix: config.channel_id_suffix.clone(),
        share_current_tab_only: config.share_current_tab_only,
    }))
}

/// GET /nbwhisper/v1/config - Legacy (SkyWay) configuration shape
pub async fn get_config_v1(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<V1ConfigResponse>, ApiError> {
    auth::authorize(&state.config, &headers)?;

    let config = &state.config;
    Ok(Json(V1ConfigResponse {
        username: resolve_username(config),
        skyway_api_token: config.skyway_api_token.clone(),
        room_mode_for_waiting_room: config.room_mode_for_waiting_room,
        room_mode_for_talking_room: config.room_mode_for_talking_room,
    }))
}

// === Sora Proxy ===

/// GET /nbwhisper/create-access-token - Proxy vendor token issuance
///
/// The vendor's status code is returned as data; only a failure to reach
/// the vendor at all is an error (502).
pub async fn create_access_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CreateAccessTokenQuery>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    auth::authorize(&state.config, &headers)?;

    debug!(channel_id = %query.channel_id, "Requesting access token");

    let token = state
        .sora
        .create_access_token(&query.api_key, &query.channel_id)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to reach Sora Cloud for access token");
            ApiError::Upstream
        })?;

    Ok(Json(AccessTokenResponse {
        status: token.status,
        text: token.text,
    }))
}

/// GET /nbwhisper/push-channel - Proxy vendor channel push
///
/// `data` is a JSON-encoded string; absent means an empty object, malformed
/// JSON is rejected with 400 before any vendor call.
pub async fn push_channel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PushChannelQuery>,
) -> Result<Json<PushChannelResponse>, ApiError> {
    auth::authorize(&state.config, &headers)?;

    let data = match query.data {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|_| ApiError::InvalidInput("data must be valid JSON"))?,
        None => serde_json::json!({}),
    };

    debug!(channel_id = %query.channel_id, "Pushing to channel");

    let status = state
        .sora
        .push_channel(&query.api_key, &query.channel_id, data)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to reach Sora Cloud for channel push");
            ApiError::Upstream
        })?;

    Ok(Json(PushChannelResponse { status }))
}

// === Error Handling ===

/// API error types
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(&'static str),
    /// Vendor API could not be reached (transport failure)
    Upstream,
    /// Authorization error (wraps AuthError)
    Auth(AuthError),
}

/// Implement From<AuthError> to enable ? operator in handlers
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Auth(auth_err) => auth_err.into_response(),
            ApiError::InvalidInput(msg) => {
                let body = Json(ErrorResponse {
                    error: msg.to_string(),
                    code: "INVALID_INPUT",
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Upstream => {
                let body = Json(ErrorResponse {
                    error: "could not reach Sora Cloud".to_string(),
                    code: "UPSTREAM_UNREACHABLE",
                });
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
        }
    }
}
