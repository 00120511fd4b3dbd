//! Local fallback store: one JSON file per entity collection.
//!
//! This is the always-available half of the entity store. Every save writes
//! the full collection snapshot here unconditionally, so the app keeps
//! working (and keeps its data) when the remote store is unreachable or not
//! configured at all. File names are the fixed keys the original deployment
//! used for its serialized arrays.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{
    Appointment, EstablishmentInfo, ExpenseEntry, RevenueEntry, ServiceItem, User, Vehicle,
};

const REVENUE_KEY: &str = "lavajato_faturamento_v4";
const EXPENSES_KEY: &str = "lavajato_despesas_v4";
const APPOINTMENTS_KEY: &str = "lavajato_agendamentos_v1";
const USERS_KEY: &str = "lavajato_users_v1";
const SERVICES_KEY: &str = "lavajato_services_v1";
const VEHICLES_KEY: &str = "lavajato_vehicles_v1";
const ESTABLISHMENT_KEY: &str = "lavajato_establishment_v1";

#[derive(Clone)]
pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)
                .with_context(|| format!("creating data directory {}", base_dir.display()))?;
        }
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Missing files read as an empty collection.
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Write-then-rename so a crash mid-write never truncates a snapshot.
    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    pub fn appointments(&self) -> Result<Vec<Appointment>> {
        self.read_list(APPOINTMENTS_KEY)
    }

    pub fn set_appointments(&self, items: &[Appointment]) -> Result<()> {
        self.write_json(APPOINTMENTS_KEY, &items)
    }

    pub fn revenue(&self) -> Result<Vec<RevenueEntry>> {
        self.read_list(REVENUE_KEY)
    }

    pub fn set_revenue(&self, items: &[RevenueEntry]) -> Result<()> {
        self.write_json(REVENUE_KEY, &items)
    }

    pub fn expenses(&self) -> Result<Vec<ExpenseEntry>> {
        self.read_list(EXPENSES_KEY)
    }

    pub fn set_expenses(&self, items: &[ExpenseEntry]) -> Result<()> {
        self.write_json(EXPENSES_KEY, &items)
    }

    pub fn services(&self) -> Result<Vec<ServiceItem>> {
        self.read_list(SERVICES_KEY)
    }

    pub fn set_services(&self, items: &[ServiceItem]) -> Result<()> {
        self.write_json(SERVICES_KEY, &items)
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.read_list(USERS_KEY)
    }

    pub fn set_users(&self, items: &[User]) -> Result<()> {
        self.write_json(USERS_KEY, &items)
    }

    pub fn vehicles(&self) -> Result<Vec<Vehicle>> {
        self.read_list(VEHICLES_KEY)
    }

    pub fn set_vehicles(&self, items: &[Vehicle]) -> Result<()> {
        self.write_json(VEHICLES_KEY, &items)
    }

    pub fn establishment(&self) -> Result<Option<EstablishmentInfo>> {
        let path = self.path_for(ESTABLISHMENT_KEY);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn set_establishment(&self, info: &EstablishmentInfo) -> Result<()> {
        self.write_json(ESTABLISHMENT_KEY, info)
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| u.id == user_id))
    }

    pub fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| u.phone == phone))
    }

    pub fn push_user(&self, user: &User) -> Result<()> {
        let mut users = self.users()?;
        users.push(user.clone());
        self.set_users(&users)
    }

    pub fn add_points(&self, user_id: &str, delta: i64) -> Result<()> {
        let mut users = self.users()?;
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.points += delta;
            self.set_users(&users)?;
        }
        Ok(())
    }

    pub fn push_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles()?;
        vehicles.push(vehicle.clone());
        self.set_vehicles(&vehicles)
    }

    pub fn remove_vehicle(&self, vehicle_id: &str) -> Result<()> {
        let vehicles: Vec<Vehicle> = self
            .vehicles()?
            .into_iter()
            .filter(|v| v.id != vehicle_id)
            .collect();
        self.set_vehicles(&vehicles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AppointmentStatus, UserRole, VehicleSize};

    fn store() -> (LocalStore, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn missing_files_read_as_empty_collections() {
        let (store, _dir) = store();
        assert!(store.appointments().unwrap().is_empty());
        assert!(store.users().unwrap().is_empty());
        assert!(store.establishment().unwrap().is_none());
    }

    #[test]
    fn appointment_snapshots_round_trip() {
        let (store, _dir) = store();
        let items = vec![Appointment {
            id: "a1".into(),
            user_id: Some("u1".into()),
            customer_name: "Maria".into(),
            customer_phone: "31988887777".into(),
            service_label: "Lavagem Completa".into(),
            price: 70.0,
            scheduled_at: "2025-06-01T14:00:00".into(),
            status: AppointmentStatus::Pending,
            created_at: "2025-05-30T09:00:00Z".into(),
            vehicle_snapshot: Some("Honda Civic Branco (ABC-1234)".into()),
        }];

        store.set_appointments(&items).unwrap();
        assert_eq!(store.appointments().unwrap(), items);
    }

    #[test]
    fn points_accumulate_on_the_stored_user() {
        let (store, _dir) = store();
        store
            .push_user(&User {
                id: "u1".into(),
                name: "Maria".into(),
                phone: "31988887777".into(),
                password: "segredo".into(),
                role: UserRole::Client,
                points: 0,
            })
            .unwrap();

        store.add_points("u1", 10).unwrap();
        store.add_points("u1", 10).unwrap();
        assert_eq!(store.find_user("u1").unwrap().unwrap().points, 20);
    }

    #[test]
    fn add_points_for_unknown_user_is_a_no_op() {
        let (store, _dir) = store();
        store.add_points("ghost", 10).unwrap();
        assert!(store.users().unwrap().is_empty());
    }

    #[test]
    fn vehicles_can_be_added_and_removed() {
        let (store, _dir) = store();
        let vehicle = Vehicle {
            id: "v1".into(),
            user_id: "u1".into(),
            brand: "Fiat".into(),
            model: "Uno".into(),
            year: "2012".into(),
            color: "Prata".into(),
            plate: None,
            size: VehicleSize::Small,
        };
        store.push_vehicle(&vehicle).unwrap();
        assert_eq!(store.vehicles().unwrap().len(), 1);

        store.remove_vehicle("v1").unwrap();
        assert!(store.vehicles().unwrap().is_empty());
    }
}
