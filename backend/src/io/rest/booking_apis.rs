//! Client booking submission and slot lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use log::{error, info};

use super::error_response;
use crate::domain::{BookingFlow, DomainError};
use crate::AppState;
use shared::BookingRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_booking))
        .route("/slots/:date", get(free_slots))
}

pub async fn submit_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/bookings - user: {} service: {} slot: {} {}",
        request.user_id, request.service_id, request.date, request.time
    );

    let user = match state.user_service.get_user(&request.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return error_response(DomainError::AuthRequired.into()),
        Err(e) => {
            error!("user lookup failed: {e}");
            return error_response(e);
        }
    };

    let mut flow = BookingFlow::new(Utc::now().date_naive());
    flow.service_id = Some(request.service_id);
    flow.date = Some(request.date);
    flow.time = Some(request.time);
    flow.vehicle_id = Some(request.vehicle_id);

    match state.booking_service.submit(&mut flow, &user).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => {
            error!("booking failed: {e}");
            error_response(e)
        }
    }
}

pub async fn free_slots(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/bookings/slots/{date}");

    match state
        .booking_service
        .free_slots(Utc::now().date_naive(), &date)
        .await
    {
        Ok(slots) => (StatusCode::OK, Json(slots)).into_response(),
        Err(e) => {
            error!("slot lookup failed: {e}");
            error_response(e)
        }
    }
}
