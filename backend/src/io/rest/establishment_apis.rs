//! Establishment profile endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::error_response;
use crate::domain::models::EstablishmentInfo;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_establishment).put(update_establishment))
}

pub async fn get_establishment(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/establishment");
    (StatusCode::OK, Json(state.establishment_service.get().await))
}

pub async fn update_establishment(
    State(state): State<AppState>,
    Json(info): Json<EstablishmentInfo>,
) -> impl IntoResponse {
    info!("PUT /api/establishment");

    match state.establishment_service.save(info).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("establishment update failed: {e}");
            error_response(e)
        }
    }
}
