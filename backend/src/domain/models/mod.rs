//! Domain models for the car-wash aggregates.

pub mod appointment;
pub mod establishment;
pub mod expense;
pub mod revenue;
pub mod service_item;
pub mod user;
pub mod vehicle;

pub use appointment::{Appointment, AppointmentStatus};
pub use establishment::EstablishmentInfo;
pub use expense::{normalize_expense_date, ExpenseEntry};
pub use revenue::{PaymentMethod, RevenueEntry, VehicleSize};
pub use service_item::ServiceItem;
pub use user::{User, UserRole};
pub use vehicle::Vehicle;

/// A record living in one of the persisted collections.
///
/// Every collection record carries an opaque unique id; the change detector
/// relies on this together with derived `PartialEq` for structural equality.
pub trait Entity {
    fn id(&self) -> &str;
}

/// Generate an opaque record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
