//! Client-owned vehicles.
use serde::{Deserialize, Serialize};

use super::revenue::VehicleSize;
use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub user_id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub plate: Option<String>,
    pub size: VehicleSize,
}

impl Vehicle {
    /// Human-readable snapshot copied onto appointments at booking time.
    ///
    /// The snapshot is immutable history: later edits or deletion of the
    /// vehicle never touch appointments that carry it.
    pub fn description(&self) -> String {
        match &self.plate {
            Some(plate) if !plate.is_empty() => {
                format!("{} {} {} ({})", self.brand, self.model, self.color, plate)
            }
            _ => format!("{} {} {}", self.brand, self.model, self.color),
        }
    }
}

impl Entity for Vehicle {
    fn id(&self) -> &str {
        &self.id
    }
}
