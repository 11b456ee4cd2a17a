//! Token status poll background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, warn};

use crate::{
    services::BackendClient,
    state::AppState,
};

/// Background task that fetches authoritative token snapshots.
///
/// Polls once at startup, then on a fixed interval, and immediately whenever
/// a manual refresh request arrives over the broadcast channel. A failed
/// fetch leaves the last known countdown untouched; the ticker keeps
/// decrementing from it until a later poll succeeds.
pub async fn token_poll_task(state: Arc<AppState>, client: BackendClient, poll_interval: Duration) {
    info!("Starting token poll task (interval: {:?})", poll_interval);

    let mut refresh_rx = state.refresh_tx.subscribe();
    let mut interval = interval(poll_interval);

    loop {
        tokio::select! {
            // Periodic poll; the first tick fires immediately at startup
            _ = interval.tick() => {
                poll_all(&state, &client).await;
            }

            // Manual refresh - poll out of band without disturbing the cadence
            result = refresh_rx.recv() => {
                match result {
                    Ok(()) => {
                        debug!("Poll task received manual refresh request");
                        poll_all(&state, &client).await;
                    }
                    Err(e) => {
                        error!("Error receiving refresh request: {}", e);
                        // Wait a bit before retrying
                        sleep(Duration::from_secs(1)).await;
                        refresh_rx = state.refresh_tx.subscribe();
                    }
                }
            }
        }
    }
}

/// Fetch and apply a snapshot for every monitored connection
async fn poll_all(state: &Arc<AppState>, client: &BackendClient) {
    for connection in state.connection_names() {
        match client.fetch_token_status(&connection).await {
            Ok(Some(snapshot)) => {
                if let Err(e) = state.apply_snapshot(&connection, snapshot) {
                    error!("Failed to apply snapshot for {}: {}", connection, e);
                }
            }
            Ok(None) => {
                if let Err(e) = state.clear_token(&connection) {
                    error!("Failed to clear token for {}: {}", connection, e);
                }
            }
            Err(e) => {
                // Keep counting down from the last authoritative value.
                warn!("Token status poll failed for {}: {:#}", connection, e);
            }
        }
    }

    state.record_poll();
}
