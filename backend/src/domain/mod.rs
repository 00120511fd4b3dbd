//! Business logic: models, the change detector, scheduling rules, the
//! appointment lifecycle engine and the collection services built on top of
//! the entity store.

pub mod appointment_service;
pub mod booking_flow;
pub mod catalog_service;
pub mod change_detector;
pub mod commands;
pub mod error;
pub mod establishment_service;
pub mod expense_service;
pub mod models;
pub mod revenue_service;
pub mod scheduling;
pub mod sync;
pub mod user_service;
pub mod vehicle_service;

pub use appointment_service::AppointmentService;
pub use booking_flow::{BookingFlow, BookingService, BookingStep};
pub use catalog_service::CatalogService;
pub use error::DomainError;
pub use establishment_service::EstablishmentService;
pub use expense_service::ExpenseService;
pub use revenue_service::{FinancialSummary, RevenueService};
pub use user_service::UserService;
pub use vehicle_service::VehicleService;
