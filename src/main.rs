//! Tokenwatch - a countdown-reconciliation daemon for broker token expiry
//!
//! This is the main entry point for the tokenwatch application.

use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::info;

use tokenwatch::{
    config::Config,
    state::AppState,
    api::create_router,
    services::BackendClient,
    tasks::{countdown_ticker_task, token_poll_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tokenwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tokenwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, backend={}, poll_interval={}s, connections={:?}",
          config.host, config.port, config.backend_url, config.poll_interval, config.connections);

    // Client for the backend that owns token state
    let client = BackendClient::new(&config.backend_url)?;

    // Create application state with one countdown per connection
    let state = Arc::new(AppState::new(config.port, config.host.clone(), &config.connections));

    // Start the poll task (authoritative snapshots)
    let poll_state = Arc::clone(&state);
    let poll_interval = Duration::from_secs(config.poll_interval);
    tokio::spawn(async move {
        token_poll_task(poll_state, client, poll_interval).await;
    });

    // Start the ticker task (local 1-second countdown)
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status  - Rendered countdown per connection");
    info!("  POST /refresh - Request an immediate token poll");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
