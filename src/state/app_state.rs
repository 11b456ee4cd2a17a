//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::services::TokenSnapshot;
use super::TokenTimerState;

/// Main application state: one independent countdown per monitored connection
#[derive(Debug)]
pub struct AppState {
    /// Per-connection countdown states, keyed by connection name.
    /// The map is fixed at startup; each entry is locked independently.
    timers: HashMap<String, Arc<Mutex<TokenTimerState>>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last poll attempt tracking
    pub last_poll_at: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for manual refresh requests (handler -> poll task)
    pub refresh_tx: broadcast::Sender<()>,
    /// Keep the receiver alive to prevent channel closure
    _refresh_rx: broadcast::Receiver<()>,
}

impl AppState {
    /// Create a new AppState with one countdown per connection name
    pub fn new(port: u16, host: String, connections: &[String]) -> Self {
        let (refresh_tx, refresh_rx) = broadcast::channel(16);

        let timers = connections
            .iter()
            .map(|name| (name.clone(), Arc::new(Mutex::new(TokenTimerState::new()))))
            .collect();

        Self {
            timers,
            start_time: Instant::now(),
            port,
            host,
            last_poll_at: Arc::new(Mutex::new(None)),
            refresh_tx,
            _refresh_rx: refresh_rx,
        }
    }

    /// Names of all monitored connections
    pub fn connection_names(&self) -> Vec<String> {
        self.timers.keys().cloned().collect()
    }

    /// Record an authoritative snapshot for a connection
    pub fn apply_snapshot(&self, connection: &str, snapshot: TokenSnapshot) -> Result<(), String> {
        let timer = self.timers.get(connection)
            .ok_or_else(|| format!("Unknown connection: {}", connection))?;

        let mut state = timer.lock()
            .map_err(|e| format!("Failed to lock timer state for {}: {}", connection, e))?;

        debug!(
            "Applying snapshot for {}: status={:?}, seconds_left={:?}",
            connection, snapshot.token_status, snapshot.seconds_left
        );
        state.on_authoritative_update(
            snapshot.seconds_left,
            snapshot.token_status,
            snapshot.expires_at_ist,
            snapshot.last_refreshed_at,
            snapshot.next_auto_refresh_at,
        );

        Ok(())
    }

    /// Mark a connection as token-less, resetting its display to placeholder
    pub fn clear_token(&self, connection: &str) -> Result<(), String> {
        let timer = self.timers.get(connection)
            .ok_or_else(|| format!("Unknown connection: {}", connection))?;

        let mut state = timer.lock()
            .map_err(|e| format!("Failed to lock timer state for {}: {}", connection, e))?;

        if state.has_token() {
            info!("Token removed for {}, resetting countdown to placeholder", connection);
        }
        state.clear();
        Ok(())
    }

    /// Advance every countdown by one tick
    pub fn tick_all(&self) {
        for (connection, timer) in &self.timers {
            match timer.lock() {
                Ok(mut state) => state.tick(),
                Err(e) => warn!("Skipping tick for {}: {}", connection, e),
            }
        }
    }

    /// Get a snapshot of a connection's current countdown state
    pub fn get_timer_state(&self, connection: &str) -> Result<TokenTimerState, String> {
        let timer = self.timers.get(connection)
            .ok_or_else(|| format!("Unknown connection: {}", connection))?;

        timer.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state for {}: {}", connection, e))
    }

    /// Request an immediate out-of-band poll (manual refresh)
    pub fn request_refresh(&self) -> Result<(), String> {
        info!("Manual refresh requested");
        self.refresh_tx.send(())
            .map(|_| ())
            .map_err(|e| format!("Failed to send refresh request: {}", e))
    }

    /// Record that a poll pass has just completed
    pub fn record_poll(&self) {
        if let Ok(mut last_poll) = self.last_poll_at.lock() {
            *last_poll = Some(Utc::now());
        }
    }

    /// Get the time of the last poll pass, if any
    pub fn get_last_poll(&self) -> Option<DateTime<Utc>> {
        self.last_poll_at.lock().ok().and_then(|t| *t)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TokenStatus;

    fn snapshot(seconds_left: Option<i64>, status: TokenStatus) -> TokenSnapshot {
        TokenSnapshot {
            token_status: status,
            seconds_left,
            expires_at_ist: None,
            last_refreshed_at: None,
            next_auto_refresh_at: None,
        }
    }

    #[test]
    fn timers_for_different_connections_are_independent() {
        let state = AppState::new(
            0,
            "127.0.0.1".to_string(),
            &["truedata".to_string(), "zerodha".to_string()],
        );

        state.apply_snapshot("truedata", snapshot(Some(100), TokenStatus::Active)).unwrap();
        state.apply_snapshot("zerodha", snapshot(Some(50), TokenStatus::Active)).unwrap();

        state.tick_all();
        state.tick_all();

        assert_eq!(state.get_timer_state("truedata").unwrap().display_seconds(), 98);
        assert_eq!(state.get_timer_state("zerodha").unwrap().display_seconds(), 48);
    }

    #[test]
    fn unknown_connection_is_rejected() {
        let state = AppState::new(0, "127.0.0.1".to_string(), &["truedata".to_string()]);
        assert!(state.apply_snapshot("fyers", snapshot(Some(10), TokenStatus::Active)).is_err());
        assert!(state.get_timer_state("fyers").is_err());
    }

    #[test]
    fn clear_token_resets_to_placeholder() {
        let state = AppState::new(0, "127.0.0.1".to_string(), &["truedata".to_string()]);
        state.apply_snapshot("truedata", snapshot(Some(100), TokenStatus::Active)).unwrap();
        state.clear_token("truedata").unwrap();
        assert!(!state.get_timer_state("truedata").unwrap().has_token());
    }

    #[tokio::test]
    async fn refresh_request_reaches_subscribers() {
        let state = AppState::new(0, "127.0.0.1".to_string(), &["truedata".to_string()]);
        let mut rx = state.refresh_tx.subscribe();
        state.request_refresh().unwrap();
        assert!(rx.recv().await.is_ok());
    }
}
