//! Per-user garage.

use anyhow::Result;
use std::sync::Arc;

use super::commands::AddVehicleCommand;
use super::models::{new_id, Vehicle};
use crate::storage::EntityStore;

pub struct VehicleService {
    store: Arc<EntityStore>,
}

impl VehicleService {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Vehicle>> {
        self.store.get_user_vehicles(user_id).await
    }

    pub async fn add(&self, cmd: AddVehicleCommand) -> Result<Vehicle> {
        let vehicle = Vehicle {
            id: new_id(),
            user_id: cmd.user_id,
            brand: cmd.brand,
            model: cmd.model,
            year: cmd.year,
            color: cmd.color,
            plate: cmd.plate,
            size: cmd.size,
        };
        log::info!("adding vehicle {} for user {}", vehicle.id, vehicle.user_id);
        self.store.add_vehicle(&vehicle).await?;
        Ok(vehicle)
    }

    /// Remove a vehicle from the garage. Appointment snapshots taken from it
    /// are plain strings and stay intact.
    pub async fn delete(&self, vehicle_id: &str) -> Result<()> {
        log::info!("deleting vehicle {vehicle_id}");
        self.store.delete_vehicle(vehicle_id).await
    }
}
