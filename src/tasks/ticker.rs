//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::info;

use crate::state::AppState;

/// Background task that advances every countdown once per second.
///
/// The tick path itself decides between decrement and resync by re-reading
/// the shared state, so this task stays oblivious to poll timing.
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut interval = interval(Duration::from_secs(1));

    loop {
        interval.tick().await;
        state.tick_all();
    }
}
