//! Admin-side appointment endpoints.
//!
//! `PUT /api/appointments` is the optimistic full-list update: the admin
//! client edits its copy of the collection and sends the whole thing back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};

use super::error_response;
use crate::domain::models::{Appointment, AppointmentStatus};
use crate::domain::DomainError;
use crate::AppState;
use shared::StatusTransitionRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).put(update_appointments))
        .route("/:id/status", post(transition_appointment))
}

pub async fn list_appointments(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/appointments");
    let list = state.cache.read().await.appointments.clone();
    (StatusCode::OK, Json(list))
}

pub async fn update_appointments(
    State(state): State<AppState>,
    Json(new_list): Json<Vec<Appointment>>,
) -> impl IntoResponse {
    info!("PUT /api/appointments - {} records", new_list.len());

    match state.appointment_service.apply_update(new_list).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("appointment update failed: {e}");
            error_response(e)
        }
    }
}

pub async fn transition_appointment(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    Json(request): Json<StatusTransitionRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/appointments/{}/status - target: {}",
        appointment_id, request.status
    );

    let Some(target) = AppointmentStatus::parse(&request.status) else {
        return error_response(DomainError::MissingField("status").into());
    };
    match state
        .appointment_service
        .transition(&appointment_id, target)
        .await
    {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => {
            error!("status transition failed: {e}");
            error_response(e)
        }
    }
}
