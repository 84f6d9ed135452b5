//! Session token verification for the nbwhisper companion server.
//!
//! Stands in for the host notebook server's authenticated-session check:
//! every API route (except `/health`) requires the configured service token.
//! When no token is configured the server runs open, matching a token-less
//! notebook host.
//!
//! Tokens are compared through their SHA-256 digests so raw token bytes are
//! never compared directly.

use crate::config::Config;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ring::digest::{digest, SHA256};
use serde::Serialize;

/// Authorization error
#[derive(Debug)]
pub enum AuthError {
    /// Missing Authorization header
    MissingHeader,
    /// Invalid Authorization header format
    InvalidHeader,
    /// Token verification failed
    Unauthorized,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingHeader => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTH",
                "Authorization header required",
            ),
            AuthError::InvalidHeader => (
                StatusCode::BAD_REQUEST,
                "INVALID_AUTH",
                "Invalid Authorization header format",
            ),
            AuthError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid session token")
            }
        };

        let body = Json(AuthErrorResponse {
            error: message.to_string(),
            code,
        });

        (status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: String,
    code: &'static str,
}

/// Verify the request carries the configured service token.
///
/// Accepts both the common `Bearer <token>` scheme and the notebook-style
/// `token <token>` scheme. A server without a configured token admits every
/// request.
pub fn authorize(config: &Config, headers: &HeaderMap) -> Result<(), AuthError> {
    let Some(expected) = config.service_token.as_deref() else {
        return Ok(());
    };

    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let token = extract_token(header_value).ok_or(AuthError::InvalidHeader)?;

    if hash_token(token) == hash_token(expected) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Extract the token from an Authorization header value
pub fn extract_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix("Bearer ")
        .or_else(|| authorization.strip_prefix("bearer "))
        .or_else(|| authorization.strip_prefix("token "))
        .or_else(|| authorization.strip_prefix("Token "))
}

/// Hash a token using SHA-256 and return hex-encoded result
pub fn hash_token(token: &str) -> String {
    let hash = digest(&SHA256, token.as_bytes());
    hex::encode(hash.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config_with_token(token: Option<&str>) -> Config {
        Config {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            service_token: token.map(String::from),
            signaling_url: String::new(),
            api_key: String::new(),
            channel_id_prefix: String::new(),
            channel_id_suffix: String::new(),
            default_username: "jovyan".to_string(),
            share_current_tab_only: false,
            skyway_api_token: String::new(),
            room_mode_for_waiting_room: crate::config::RoomMode::Sfu,
            room_mode_for_talking_room: crate::config::RoomMode::Mesh,
            sora_api_base: crate::config::DEFAULT_SORA_API_BASE.to_string(),
        }
    }

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn hash_token_works() {
        let token = "test-token-1234567890abcdef";
        let hash = hash_token(token);

        // Should be 64 hex chars (32 bytes SHA-256)
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        // Should be deterministic
        assert_eq!(hash, hash_token(token));
    }

    #[test]
    fn extract_token_accepts_both_schemes() {
        assert_eq!(extract_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_token("bearer ABC123"), Some("ABC123"));
        assert_eq!(extract_token("token abc123"), Some("abc123"));
        assert_eq!(extract_token("Token abc123"), Some("abc123"));
        assert_eq!(extract_token("Basic abc123"), None);
        assert_eq!(extract_token("abc123"), None);
    }

    #[test]
    fn authorize_open_server_admits_everything() {
        let config = config_with_token(None);
        assert!(authorize(&config, &HeaderMap::new()).is_ok());
        assert!(authorize(&config, &headers_with_auth("Bearer whatever")).is_ok());
    }

    #[test]
    fn authorize_checks_token() {
        let config = config_with_token(Some("secret"));

        assert!(authorize(&config, &headers_with_auth("Bearer secret")).is_ok());
        assert!(authorize(&config, &headers_with_auth("token secret")).is_ok());

        assert!(matches!(
            authorize(&config, &HeaderMap::new()),
            Err(AuthError::MissingHeader)
        ));
        assert!(matches!(
            authorize(&config, &headers_with_auth("secret")),
            Err(AuthError::InvalidHeader)
        ));
        assert!(matches!(
            authorize(&config, &headers_with_auth("Bearer wrong")),
            Err(AuthError::Unauthorized)
        ));
    }
}
