//! REST endpoints, one module per resource.

pub mod appointment_apis;
pub mod auth_apis;
pub mod booking_apis;
pub mod catalog_apis;
pub mod establishment_apis;
pub mod finance_apis;
pub mod health_apis;
pub mod user_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::DomainError;

/// Map a service failure onto an HTTP response.
///
/// Known domain failures keep their (Portuguese) message; anything else is an
/// opaque 500 so internals never leak to clients.
pub fn error_response(e: anyhow::Error) -> Response {
    let status = match e.downcast_ref::<DomainError>() {
        Some(DomainError::AppointmentNotFound(_))
        | Some(DomainError::UnknownService(_))
        | Some(DomainError::UnknownVehicle(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::SlotTaken { .. })
        | Some(DomainError::InvalidTransition { .. })
        | Some(DomainError::DuplicatePhone) => StatusCode::CONFLICT,
        Some(DomainError::BadCredentials) | Some(DomainError::AuthRequired) => {
            StatusCode::UNAUTHORIZED
        }
        Some(_) => StatusCode::BAD_REQUEST,
        None => return (StatusCode::INTERNAL_SERVER_ERROR, "erro interno").into_response(),
    };
    (status, e.to_string()).into_response()
}
