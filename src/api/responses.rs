//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{self, TimerColor},
    state::{TokenStatus, TokenTimerState},
};

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
        }
    }

    /// Create an accepted response
    pub fn accepted(message: String) -> Self {
        Self::new("accepted".to_string(), message)
    }
}

/// Rendered countdown for a single connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connection: String,
    pub countdown: String,
    pub color: TimerColor,
    pub token_status: TokenStatus,
    pub expires_at: String,
    pub last_refreshed_at: String,
    pub next_auto_refresh_at: String,
}

impl ConnectionStatus {
    /// Build the rendered view of a connection's countdown state
    pub fn from_timer(connection: String, timer: &TokenTimerState) -> Self {
        let (countdown, color) = display::countdown_display(timer);
        Self {
            connection,
            countdown,
            color,
            token_status: timer.token_status(),
            expires_at: display::format_ist(timer.expires_at()),
            last_refreshed_at: display::format_ist(timer.last_refreshed_at()),
            next_auto_refresh_at: display::format_ist(timer.next_auto_refresh_at()),
        }
    }
}

/// Status response covering every monitored connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub connections: Vec<ConnectionStatus>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_poll_at: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
