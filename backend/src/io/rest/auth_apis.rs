//! Login and client registration.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{error, info};

use super::error_response;
use crate::domain::commands::RegisterUserCommand;
use crate::domain::models::User;
use crate::AppState;
use shared::{LoginRequest, RegisterRequest, UserResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Strip the password before a user goes over the wire.
pub fn to_user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        phone: user.phone,
        role: user.role.as_str().to_string(),
        points: user.points,
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - phone: {}", request.phone);

    match state
        .user_service
        .login(&request.phone, &request.password)
        .await
    {
        Ok(user) => (StatusCode::OK, Json(to_user_response(user))).into_response(),
        Err(e) => {
            error!("login failed: {e}");
            error_response(e)
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/register - phone: {}", request.phone);

    let command = RegisterUserCommand {
        name: request.name,
        phone: request.phone,
        password: request.password,
    };
    match state.user_service.register(command).await {
        Ok(user) => (StatusCode::CREATED, Json(to_user_response(user))).into_response(),
        Err(e) => {
            error!("registration failed: {e}");
            error_response(e)
        }
    }
}
