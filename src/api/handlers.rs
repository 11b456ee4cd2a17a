//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::AppState;
use super::responses::{ApiResponse, ConnectionStatus, HealthResponse, StatusResponse};

/// Handle GET /status - Return the rendered countdown for every connection
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let mut names = state.connection_names();
    names.sort();

    let mut connections = Vec::with_capacity(names.len());
    for name in names {
        match state.get_timer_state(&name) {
            Ok(timer) => connections.push(ConnectionStatus::from_timer(name, &timer)),
            Err(e) => {
                error!("Failed to get timer state for {}: {}", name, e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    Ok(Json(StatusResponse {
        connections,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_poll_at: state.get_last_poll(),
    }))
}

/// Handle POST /refresh - Request an immediate out-of-band token poll
pub async fn refresh_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.request_refresh() {
        Ok(()) => {
            info!("Refresh endpoint called - immediate poll requested");
            Ok(Json(ApiResponse::accepted(
                "Token status refresh requested".to_string(),
            )))
        }
        Err(e) => {
            error!("Failed to request refresh: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
