//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, response::Json};
use tracing::info;

use crate::state::{AppState, ResetSource};

use super::responses::{HealthResponse, ResetResponse, StateResponse};

/// Handle GET /api/state - current timer snapshot
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse::new(state.last_reset()))
}

/// Handle POST /api/reset - remote counter reset
///
/// Runs the same reset sequence as the physical button. A persistence
/// failure never fails the request: the in-memory reset took effect, so
/// the response stays successful and carries a warning instead.
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ResetResponse> {
    info!("Reset requested via API");
    let outcome = state.reset(ResetSource::Api);

    let response = if outcome.durable {
        ResetResponse::ok(outcome.last_reset)
    } else {
        ResetResponse::ok_not_durable(outcome.last_reset)
    };
    Json(response)
}

/// Handle GET /health - health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
