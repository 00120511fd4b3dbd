//! Wire types shared between the Lava-Jato backend and its clients.
//!
//! Entity collections travel as the domain's own serde representation; this
//! crate only carries the request/response envelopes around them.

use serde::{Deserialize, Serialize};

/// Credentials for the phone + password login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Self-service client registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// A user as exposed to clients (never includes the password).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub role: String,
    /// Loyalty points balance.
    pub points: i64,
}

/// The client booking wizard, submitted in one shot: service, slot, vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub user_id: String,
    pub service_id: String,
    /// ISO date, `YYYY-MM-DD`, within the 14-day booking window.
    pub date: String,
    /// Hourly slot, `HH:00`.
    pub time: String,
    pub vehicle_id: String,
}

/// Admin request to move an appointment along its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransitionRequest {
    /// Target status: `pendente`, `confirmado`, `concluido` or `cancelado`.
    pub status: String,
}

/// Registering a vehicle in a client's garage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddVehicleRequest {
    pub user_id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub plate: Option<String>,
    /// `Pequeno`, `Médio` or `Grande`.
    pub size: String,
}

/// Manual revenue entry recorded by the admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRevenueRequest {
    pub service_type: String,
    /// `Pequeno`, `Médio` or `Grande`.
    pub vehicle_size: String,
    pub amount: f64,
    /// `Dinheiro`, `Cartão` or `Pix`.
    pub payment: String,
}

/// Manual expense entry; `date` is date-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub note: String,
    pub date: String,
}

/// Liveness report for the status indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether a remote store is configured at all.
    pub cloud_configured: bool,
    /// Whether the last heartbeat reached the remote store.
    pub cloud_alive: bool,
    /// Epoch millis of the last successful heartbeat, if any.
    pub last_heartbeat_ms: Option<i64>,
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
}
