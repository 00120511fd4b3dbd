//! Appointment aggregate and its status state machine.
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Entity;

/// Lifecycle status of an appointment.
///
/// `Pending` is the entry state for every booking. Admins confirm or cancel
/// pending appointments and complete confirmed ones; `Completed` and
/// `Cancelled` are terminal. Wire values keep the original Portuguese labels
/// stored in the production database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "concluido")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pendente",
            AppointmentStatus::Confirmed => "confirmado",
            AppointmentStatus::Completed => "concluido",
            AppointmentStatus::Cancelled => "cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendente" => Some(AppointmentStatus::Pending),
            "confirmado" => Some(AppointmentStatus::Confirmed),
            "concluido" => Some(AppointmentStatus::Completed),
            "cancelado" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the state machine allows moving from `self` to `to`.
    pub fn can_transition(&self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, to),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled wash.
///
/// `scheduled_at` is a plain `YYYY-MM-DDTHH:MM:SS` string at one-hour
/// granularity; slot occupancy is decided by prefix match on it.
/// `vehicle_snapshot` is denormalized at booking time and never updated when
/// the source vehicle is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    /// Owning account, absent for walk-in entries captured by the admin.
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    /// Denormalized service label, not a catalog foreign key.
    pub service_label: String,
    pub price: f64,
    pub scheduled_at: String,
    pub status: AppointmentStatus,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub vehicle_snapshot: Option<String>,
}

impl Entity for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
}
