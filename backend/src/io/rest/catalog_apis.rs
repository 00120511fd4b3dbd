//! Service catalog endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::error_response;
use crate::domain::models::ServiceItem;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_services).put(update_services))
}

pub async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/services");
    (StatusCode::OK, Json(state.catalog_service.list().await))
}

pub async fn update_services(
    State(state): State<AppState>,
    Json(new_list): Json<Vec<ServiceItem>>,
) -> impl IntoResponse {
    info!("PUT /api/services - {} records", new_list.len());

    match state.catalog_service.replace(new_list).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("catalog update failed: {e}");
            error_response(e)
        }
    }
}
