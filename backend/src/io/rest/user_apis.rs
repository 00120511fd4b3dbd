//! User profiles and the per-user garage.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use log::{error, info};

use super::auth_apis::to_user_response;
use super::error_response;
use crate::domain::commands::AddVehicleCommand;
use crate::domain::models::VehicleSize;
use crate::domain::DomainError;
use crate::AppState;
use shared::AddVehicleRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route("/users/:id/vehicles", get(list_user_vehicles))
        .route("/vehicles", post(add_vehicle))
        .route("/vehicles/:id", delete(delete_vehicle))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{user_id}");

    match state.user_service.get_user(&user_id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(to_user_response(user))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "usuário não encontrado").into_response(),
        Err(e) => {
            error!("user lookup failed: {e}");
            error_response(e)
        }
    }
}

pub async fn list_user_vehicles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{user_id}/vehicles");

    match state.vehicle_service.list_for_user(&user_id).await {
        Ok(vehicles) => (StatusCode::OK, Json(vehicles)).into_response(),
        Err(e) => {
            error!("vehicle listing failed: {e}");
            error_response(e)
        }
    }
}

pub async fn add_vehicle(
    State(state): State<AppState>,
    Json(request): Json<AddVehicleRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/vehicles - user: {} {} {}",
        request.user_id, request.brand, request.model
    );

    let Some(size) = VehicleSize::parse(&request.size) else {
        return error_response(DomainError::MissingField("size").into());
    };
    let command = AddVehicleCommand {
        user_id: request.user_id,
        brand: request.brand,
        model: request.model,
        year: request.year,
        color: request.color,
        plate: request.plate,
        size,
    };
    match state.vehicle_service.add(command).await {
        Ok(vehicle) => (StatusCode::CREATED, Json(vehicle)).into_response(),
        Err(e) => {
            error!("vehicle creation failed: {e}");
            error_response(e)
        }
    }
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/vehicles/{vehicle_id}");

    match state.vehicle_service.delete(&vehicle_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("vehicle deletion failed: {e}");
            error_response(e)
        }
    }
}
