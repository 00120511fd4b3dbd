//! Liveness endpoint for the status indicator.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use crate::AppState;
use shared::HealthResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/health");

    let response = HealthResponse {
        cloud_configured: state.store.is_cloud_configured(),
        cloud_alive: state.heartbeat.is_alive(),
        last_heartbeat_ms: state.heartbeat.last_ok_ms(),
    };
    (StatusCode::OK, Json(response))
}
