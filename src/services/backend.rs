//! Backend token-status client
//!
//! Thin wrapper over the platform backend's token-status endpoint. Polling
//! cadence, and what to do with a failed poll, belong to the poll task; this
//! client only fetches and decodes one snapshot.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::TokenStatus;

/// Authoritative token snapshot as returned by the backend.
///
/// `seconds_left` may be negative (token already expired) or absent (no
/// token). Timestamp fields are ISO8601 strings kept verbatim for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSnapshot {
    #[serde(default)]
    pub token_status: TokenStatus,
    pub seconds_left: Option<i64>,
    #[serde(default)]
    pub expires_at_ist: Option<String>,
    #[serde(default)]
    pub last_refreshed_at: Option<String>,
    #[serde(default)]
    pub next_auto_refresh_at: Option<String>,
}

/// HTTP client for the backend token-status API
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current token snapshot for a connection.
    ///
    /// Returns `Ok(None)` when the backend reports no token for the
    /// connection (404); any other failure is an error the caller decides
    /// how to absorb.
    pub async fn fetch_token_status(&self, connection: &str) -> anyhow::Result<Option<TokenSnapshot>> {
        let url = format!("{}/connections/{}/token-status", self.base_url, connection);
        debug!("Polling token status: {}", url);

        let response = self.http.get(&url).send().await
            .with_context(|| format!("Token status request failed for {}", connection))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!("Backend returned {} for {}", response.status(), connection);
        }

        let snapshot = response.json::<TokenSnapshot>().await
            .with_context(|| format!("Invalid token status payload for {}", connection))?;

        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_snapshot() {
        let json = r#"{
            "token_status": "ACTIVE",
            "seconds_left": 43200,
            "expires_at_ist": "2026-08-30T18:30:00+05:30",
            "last_refreshed_at": "2026-08-30T06:30:00+05:30",
            "next_auto_refresh_at": null
        }"#;

        let snapshot: TokenSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.token_status, TokenStatus::Active);
        assert_eq!(snapshot.seconds_left, Some(43_200));
        assert_eq!(
            snapshot.expires_at_ist.as_deref(),
            Some("2026-08-30T18:30:00+05:30")
        );
        assert!(snapshot.next_auto_refresh_at.is_none());
    }

    #[test]
    fn deserializes_expired_snapshot_with_negative_seconds() {
        let json = r#"{"token_status": "EXPIRED", "seconds_left": -120}"#;
        let snapshot: TokenSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.token_status, TokenStatus::Expired);
        assert_eq!(snapshot.seconds_left, Some(-120));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"seconds_left": null}"#;
        let snapshot: TokenSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.token_status, TokenStatus::Unknown);
        assert!(snapshot.seconds_left.is_none());
    }

    #[test]
    fn unrecognised_status_becomes_unknown() {
        let json = r#"{"token_status": "REVOKED", "seconds_left": 10}"#;
        let snapshot: TokenSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.token_status, TokenStatus::Unknown);
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = BackendClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
