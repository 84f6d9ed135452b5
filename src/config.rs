//! Configuration for the nbwhisper companion server.
//!
//! All configuration is loaded from environment variables once at startup
//! and never mutated afterwards. Every field has a documented default, so a
//! bare environment still yields a working (if unconfigured) server.
//! No secrets are logged.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default Sora Cloud API base URL.
pub const DEFAULT_SORA_API_BASE: &str = "https://api.sora-cloud.shiguredo.app";

/// Default username handed to clients when no per-request override exists.
pub const DEFAULT_USERNAME: &str = "jovyan";

/// Media topology for a client-side WebRTC room.
///
/// Closed set: every participant in a team must use the same mode per room,
/// so values outside the set never reach clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomMode {
    Sfu,
    Mesh,
}

impl RoomMode {
    /// Parse a room mode string (`"sfu"` or `"mesh"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sfu" => Some(Self::Sfu),
            "mesh" => Some(Self::Mesh),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sfu => "sfu",
            Self::Mesh => "mesh",
        }
    }

    /// Read a room mode from an environment variable, falling back to
    /// `default` when the variable is absent or holds an unknown value.
    fn from_env(var: &str, default: Self) -> Self {
        match std::env::var(var) {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                warn!(
                    var,
                    value,
                    fallback = default.as_str(),
                    "Unknown room mode, using default"
                );
                default
            }),
            Err(_) => default,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// Session token clients must present on authenticated routes.
    /// When unset, authentication is disabled (open server).
    pub service_token: Option<String>,

    // === Sora client configuration (served to browsers via /config) ===
    /// WebRTC signaling URL handed to clients
    pub signaling_url: String,

    /// Sora project API key (secret, shared with authenticated clients only)
    pub api_key: String,

    /// Prefix prepended to channel IDs built by clients
    pub channel_id_prefix: String,

    /// Suffix appended to channel IDs built by clients
    pub channel_id_suffix: String,

    /// Username when no per-request override is present
    pub default_username: String,

    /// Restrict screen sharing to the current browser tab
    pub share_current_tab_only: bool,

    // === Legacy SkyWay configuration (served via /v1/config) ===
    /// API token for the legacy SkyWay integration
    pub skyway_api_token: String,

    /// Room mode for the waiting room (default: sfu)
    pub room_mode_for_waiting_room: RoomMode,

    /// Room mode for the talking room (default: mesh)
    pub room_mode_for_talking_room: RoomMode,

    // === Vendor API ===
    /// Sora Cloud API base URL (overridable for tests)
    pub sora_api_base: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            service_token: std::env::var("SERVICE_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),

            signaling_url: std::env::var("SIGNALING_URL").unwrap_or_default(),
            api_key: std::env::var("SORA_API_KEY").unwrap_or_default(),
            channel_id_prefix: std::env::var("CHANNEL_ID_PREFIX").unwrap_or_default(),
            channel_id_suffix: std::env::var("CHANNEL_ID_SUFFIX").unwrap_or_default(),
            default_username: std::env::var("DEFAULT_USERNAME")
                .unwrap_or_else(|_| DEFAULT_USERNAME.to_string()),
            share_current_tab_only: std::env::var("SHARE_CURRENT_TAB_ONLY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),

            skyway_api_token: std::env::var("SKYWAY_API_TOKEN").unwrap_or_default(),
            room_mode_for_waiting_room: RoomMode::from_env(
                "ROOM_MODE_FOR_WAITING_ROOM",
                RoomMode::Sfu,
            ),
            room_mode_for_talking_room: RoomMode::from_env(
                "ROOM_MODE_FOR_TALKING_ROOM",
                RoomMode::Mesh,
            ),

            sora_api_base: std::env::var("SORA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_SORA_API_BASE.to_string()),
        }
    }

    /// Check if session authentication is enabled
    pub fn auth_enabled(&self) -> bool {
        self.service_token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_mode_parses_closed_set() {
        assert_eq!(RoomMode::parse("sfu"), Some(RoomMode::Sfu));
        assert_eq!(RoomMode::parse("mesh"), Some(RoomMode::Mesh));
        assert_eq!(RoomMode::parse("SFU"), None);
        assert_eq!(RoomMode::parse("p2p"), None);
        assert_eq!(RoomMode::parse(""), None);
    }

    #[test]
    fn room_mode_round_trips_as_str() {
        for mode in [RoomMode::Sfu, RoomMode::Mesh] {
            assert_eq!(RoomMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn room_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RoomMode::Sfu).unwrap(), "\"sfu\"");
        assert_eq!(serde_json::to_string(&RoomMode::Mesh).unwrap(), "\"mesh\"");
    }
}
