//! Revenue, expenses and the dashboard summary.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};

use super::error_response;
use crate::domain::commands::{CreateExpenseCommand, CreateRevenueCommand};
use crate::domain::models::{ExpenseEntry, PaymentMethod, RevenueEntry, VehicleSize};
use crate::domain::DomainError;
use crate::AppState;
use shared::{CreateExpenseRequest, CreateRevenueRequest, SummaryResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/revenue",
            get(list_revenue).put(update_revenue).post(create_revenue),
        )
        .route(
            "/expenses",
            get(list_expenses).put(update_expenses).post(create_expense),
        )
        .route("/summary", get(summary))
}

pub async fn list_revenue(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/revenue");
    (StatusCode::OK, Json(state.revenue_service.list().await))
}

pub async fn update_revenue(
    State(state): State<AppState>,
    Json(new_list): Json<Vec<RevenueEntry>>,
) -> impl IntoResponse {
    info!("PUT /api/revenue - {} records", new_list.len());

    match state.revenue_service.replace(new_list).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("revenue update failed: {e}");
            error_response(e)
        }
    }
}

pub async fn create_revenue(
    State(state): State<AppState>,
    Json(request): Json<CreateRevenueRequest>,
) -> impl IntoResponse {
    info!("POST /api/revenue - {}", request.service_type);

    let Some(vehicle_size) = VehicleSize::parse(&request.vehicle_size) else {
        return error_response(DomainError::MissingField("vehicle_size").into());
    };
    let Some(payment) = PaymentMethod::parse(&request.payment) else {
        return error_response(DomainError::MissingField("payment").into());
    };
    let command = CreateRevenueCommand {
        service_type: request.service_type,
        vehicle_size,
        amount: request.amount,
        payment,
    };
    match state.revenue_service.create(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => {
            error!("revenue creation failed: {e}");
            error_response(e)
        }
    }
}

pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");
    (StatusCode::OK, Json(state.expense_service.list().await))
}

pub async fn update_expenses(
    State(state): State<AppState>,
    Json(new_list): Json<Vec<ExpenseEntry>>,
) -> impl IntoResponse {
    info!("PUT /api/expenses - {} records", new_list.len());

    match state.expense_service.replace(new_list).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("expense update failed: {e}");
            error_response(e)
        }
    }
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - R$ {:.2}", request.amount);

    let command = CreateExpenseCommand {
        amount: request.amount,
        note: request.note,
        date: request.date,
    };
    match state.expense_service.create(command).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => {
            error!("expense creation failed: {e}");
            error_response(e)
        }
    }
}

pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary");

    let totals = state.revenue_service.summary().await;
    let response = SummaryResponse {
        total_revenue: totals.total_revenue,
        total_expenses: totals.total_expenses,
        profit: totals.profit,
    };
    (StatusCode::OK, Json(response))
}
