//! Commands accepted by the domain services.
//!
//! Wire DTOs live in the `shared` crate; these are the validated inputs the
//! services actually operate on.

use super::models::{PaymentMethod, VehicleSize};

/// Create an appointment directly (admin walk-in entry, or the final step of
/// the client booking flow).
#[derive(Debug, Clone)]
pub struct CreateAppointmentCommand {
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_label: String,
    pub price: f64,
    /// `YYYY-MM-DDTHH:MM:SS` slot timestamp.
    pub scheduled_at: String,
    pub vehicle_snapshot: Option<String>,
}

/// Manual revenue entry recorded by the admin.
#[derive(Debug, Clone)]
pub struct CreateRevenueCommand {
    pub service_type: String,
    pub vehicle_size: VehicleSize,
    pub amount: f64,
    pub payment: PaymentMethod,
}

/// Manual expense entry; `date` is date-only input.
#[derive(Debug, Clone)]
pub struct CreateExpenseCommand {
    pub amount: f64,
    pub note: String,
    pub date: String,
}

/// Self-service client registration.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// Add a vehicle to a client's garage.
#[derive(Debug, Clone)]
pub struct AddVehicleCommand {
    pub user_id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub plate: Option<String>,
    pub size: VehicleSize,
}
