//! Request and response shapes for the nbwhisper API.
//!
//! The two config responses are intentionally separate, versioned shapes:
//! `/config` serves the current Sora-oriented fields while `/v1/config`
//! serves the legacy SkyWay fields. They are never merged.

use crate::config::RoomMode;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Diagnostic response for the example endpoint
#[derive(Debug, Serialize)]
pub struct ExampleResponse {
    pub data: String,
}

/// Current config shape served at `/config` (Sora integration)
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub username: String,
    pub api_key: String,
    pub signaling_url: String,
    pub channel_id_prefix: String,
    pub channel_id_suffix: String,
    pub share_current_tab_only: bool,
}

/// Legacy config shape served at `/v1/config` (SkyWay integration).
/// Exactly these four fields, nothing else.
#[derive(Debug, Serialize)]
pub struct V1ConfigResponse {
    pub username: String,
    pub skyway_api_token: String,
    pub room_mode_for_waiting_room: RoomMode,
    pub room_mode_for_talking_room: RoomMode,
}

/// Query parameters for `/create-access-token`.
/// Both parameters default to empty; the vendor rejects empty credentials.
#[derive(Debug, Deserialize)]
pub struct CreateAccessTokenQuery {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub channel_id: String,
}

/// Query parameters for `/push-channel`
#[derive(Debug, Deserialize)]
pub struct PushChannelQuery {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub channel_id: String,
    /// JSON-encoded payload forwarded to the vendor; absent means `{}`
    pub data: Option<String>,
}

/// Response for `/create-access-token`: vendor status plus the raw body
/// (body only captured on 200)
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub status: u16,
    pub text: String,
}

/// Response for `/push-channel`: vendor status only, body discarded
#[derive(Debug, Serialize)]
pub struct PushChannelResponse {
    pub status: u16,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}
