//! Sora Cloud API client.
//!
//! Thin wrapper over the two vendor endpoints the browser extension needs:
//! access-token issuance and channel push. The vendor protocol itself is
//! opaque to this server; responses are relayed without parsing. Failures
//! reaching the vendor are typed, not retried.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Vendor operation header for channel push
const PUSH_CHANNEL_TARGET: &str = "Sora_20160711.PushChannel";

/// Connection role requested for issued access tokens
const TOKEN_ROLE: &str = "sendrecv";

/// Connection cap requested for issued access tokens (vendor allows 0-5000)
const MAX_CHANNEL_CONNECTIONS: &str = "1000";

/// Error reaching the Sora Cloud API (DNS, connect, TLS, body read).
/// A vendor response with a non-success status is not an error.
#[derive(Debug, Error)]
pub enum SoraError {
    #[error("sora cloud request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of an access-token request: vendor status plus raw body text.
/// The body is only captured when the vendor answered 200.
#[derive(Debug)]
pub struct AccessToken {
    pub status: u16,
    pub text: String,
}

/// Client for the Sora Cloud REST API
#[derive(Clone)]
pub struct SoraClient {
    http: reqwest::Client,
    api_base: String,
}

impl SoraClient {
    /// Create a client targeting the given API base URL
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Request an access token for a channel.
    ///
    /// Single POST to the vendor's token-issuance endpoint, authenticated
    /// with the caller-supplied project API key. No retries.
    pub async fn create_access_token(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> Result<AccessToken, SoraError> {
        let response = self
            .http
            .post(format!("{}/projects/create-access-token", self.api_base))
            .bearer_auth(api_key)
            .query(&[
                ("channel_id", channel_id),
                ("role", TOKEN_ROLE),
                ("max_channel_connections", MAX_CHANNEL_CONNECTIONS),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = if status == 200 {
            response.text().await?
        } else {
            String::new()
        };

        debug!(status, "Sora access token response");

        Ok(AccessToken { status, text })
    }

    /// Push a signaling payload to a channel.
    ///
    /// Single POST to the vendor's API gateway with the PushChannel target
    /// header. Only the vendor's status code is relayed; the body is
    /// discarded.
    pub async fn push_channel(
        &self,
        api_key: &str,
        channel_id: &str,
        data: Value,
    ) -> Result<u16, SoraError> {
        let response = self
            .http
            .post(format!("{}/sora-api", self.api_base))
            .bearer_auth(api_key)
            .header("x-sora-target", PUSH_CHANNEL_TARGET)
            .json(&serde_json::json!({
                "channel_id": channel_id,
                "data": data,
            }))
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!(status, "Sora push channel response");

        Ok(status)
    }
}
