//! The entity store facade the domain talks to.
//!
//! Reads go to the remote store first and fall back to the local snapshot
//! when it is unreachable; read paths never surface a hard failure for that.
//! Writes follow the original's contract: the full collection snapshot is
//! persisted locally unconditionally, and only the single changed record is
//! applied to the remote store, best-effort.

use anyhow::Result;
use std::path::Path;

use super::cloud::CloudDb;
use super::local::LocalStore;
use crate::domain::models::service_item::default_catalog;
use crate::domain::models::{
    new_id, Appointment, EstablishmentInfo, ExpenseEntry, RevenueEntry, ServiceItem, User,
    UserRole, Vehicle,
};

pub struct EntityStore {
    cloud: CloudDb,
    local: LocalStore,
}

impl EntityStore {
    /// `cloud_url = None` forces local-only mode.
    pub fn new<P: AsRef<Path>>(cloud_url: Option<String>, data_dir: P) -> Result<Self> {
        Ok(Self {
            cloud: CloudDb::new(cloud_url),
            local: LocalStore::new(data_dir)?,
        })
    }

    /// Connect (when configured) and seed first-run defaults: the service
    /// catalog and the admin account.
    pub async fn init(&self, admin_phone: &str, admin_password: &str) -> Result<()> {
        if self.cloud.is_configured() && !self.cloud.connect().await {
            log::warn!("remote store not reachable at startup, running on local snapshots");
        }

        if self.list_services().await?.is_empty() {
            let catalog = default_catalog();
            log::info!("seeding default service catalog ({} items)", catalog.len());
            self.local.set_services(&catalog)?;
            for item in &catalog {
                if let Err(e) = self.cloud.upsert_service(item).await {
                    log::warn!("could not seed service {} remotely: {e}", item.id);
                }
            }
        }

        if self.find_user_by_phone(admin_phone).await?.is_none() {
            log::info!("seeding admin account for phone {admin_phone}");
            let admin = User {
                id: new_id(),
                name: "Administrador".into(),
                phone: admin_phone.into(),
                password: admin_password.into(),
                role: UserRole::Admin,
                points: 0,
            };
            self.local.push_user(&admin)?;
            if let Err(e) = self.cloud.insert_user(&admin).await {
                log::warn!("could not seed admin remotely: {e}");
            }
        }

        Ok(())
    }

    pub fn is_cloud_configured(&self) -> bool {
        self.cloud.is_configured()
    }

    pub async fn ping(&self) -> bool {
        self.cloud.ping().await
    }

    // --- appointments ---

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        if self.cloud.is_configured() {
            match self.cloud.list_appointments().await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("remote read failed, using local appointments: {e}"),
            }
        }
        self.local.appointments()
    }

    pub async fn save_appointments(
        &self,
        full: &[Appointment],
        changed: Option<&Appointment>,
        is_delete: bool,
    ) -> Result<()> {
        self.local.set_appointments(full)?;
        if let Some(item) = changed {
            let res = if is_delete {
                self.cloud.delete_appointment(&item.id).await
            } else {
                self.cloud.upsert_appointment(item).await
            };
            if let Err(e) = res {
                if self.cloud.is_configured() {
                    log::warn!("remote write failed for appointment {}: {e}", item.id);
                }
            }
        }
        Ok(())
    }

    // --- revenue ---

    pub async fn list_revenue(&self) -> Result<Vec<RevenueEntry>> {
        if self.cloud.is_configured() {
            match self.cloud.list_revenue().await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("remote read failed, using local revenue: {e}"),
            }
        }
        self.local.revenue()
    }

    pub async fn save_revenue(
        &self,
        full: &[RevenueEntry],
        changed: Option<&RevenueEntry>,
        is_delete: bool,
    ) -> Result<()> {
        self.local.set_revenue(full)?;
        if let Some(item) = changed {
            let res = if is_delete {
                self.cloud.delete_revenue(&item.id).await
            } else {
                self.cloud.upsert_revenue(item).await
            };
            if let Err(e) = res {
                if self.cloud.is_configured() {
                    log::warn!("remote write failed for revenue {}: {e}", item.id);
                }
            }
        }
        Ok(())
    }

    // --- expenses ---

    pub async fn list_expenses(&self) -> Result<Vec<ExpenseEntry>> {
        if self.cloud.is_configured() {
            match self.cloud.list_expenses().await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("remote read failed, using local expenses: {e}"),
            }
        }
        self.local.expenses()
    }

    pub async fn save_expenses(
        &self,
        full: &[ExpenseEntry],
        changed: Option<&ExpenseEntry>,
        is_delete: bool,
    ) -> Result<()> {
        self.local.set_expenses(full)?;
        if let Some(item) = changed {
            let res = if is_delete {
                self.cloud.delete_expense(&item.id).await
            } else {
                self.cloud.upsert_expense(item).await
            };
            if let Err(e) = res {
                if self.cloud.is_configured() {
                    log::warn!("remote write failed for expense {}: {e}", item.id);
                }
            }
        }
        Ok(())
    }

    // --- services ---

    pub async fn list_services(&self) -> Result<Vec<ServiceItem>> {
        if self.cloud.is_configured() {
            match self.cloud.list_services().await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("remote read failed, using local services: {e}"),
            }
        }
        self.local.services()
    }

    pub async fn save_services(
        &self,
        full: &[ServiceItem],
        changed: Option<&ServiceItem>,
        is_delete: bool,
    ) -> Result<()> {
        self.local.set_services(full)?;
        if let Some(item) = changed {
            let res = if is_delete {
                self.cloud.delete_service(&item.id).await
            } else {
                self.cloud.upsert_service(item).await
            };
            if let Err(e) = res {
                if self.cloud.is_configured() {
                    log::warn!("remote write failed for service {}: {e}", item.id);
                }
            }
        }
        Ok(())
    }

    // --- users ---

    /// Check credentials. A reachable remote store is authoritative, so its
    /// rejection is final; the local snapshot only answers when the remote
    /// store is unreachable or not configured.
    pub async fn login(&self, phone: &str, password: &str) -> Result<Option<User>> {
        if self.cloud.is_configured() {
            match self.cloud.login(phone, password).await {
                Ok(found) => return Ok(found),
                Err(e) => log::warn!("remote login check failed, trying local: {e}"),
            }
        }
        Ok(self
            .local
            .users()?
            .into_iter()
            .find(|u| u.phone == phone && u.password == password))
    }

    /// Returns `false` when the phone is already registered.
    pub async fn register(&self, user: &User) -> Result<bool> {
        if self.find_user_by_phone(&user.phone).await?.is_some() {
            return Ok(false);
        }
        self.local.push_user(user)?;
        if let Err(e) = self.cloud.insert_user(user).await {
            if self.cloud.is_configured() {
                log::warn!("remote write failed for user {}: {e}", user.id);
            }
        }
        Ok(true)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        if self.cloud.is_configured() {
            match self.cloud.get_user(user_id).await {
                Ok(found @ Some(_)) => return Ok(found),
                Ok(None) => {}
                Err(e) => log::warn!("remote read failed, using local users: {e}"),
            }
        }
        self.local.find_user(user_id)
    }

    pub async fn find_user_by_phone(&self, phone: &str) -> Result<Option<User>> {
        if self.cloud.is_configured() {
            match self.cloud.find_user_by_phone(phone).await {
                Ok(found @ Some(_)) => return Ok(found),
                Ok(None) => {}
                Err(e) => log::warn!("remote read failed, using local users: {e}"),
            }
        }
        self.local.find_user_by_phone(phone)
    }

    /// Award loyalty points. Applied to the local snapshot as well so the
    /// program keeps working in local-only mode; the remote write remains
    /// best-effort per the partial-cascade policy.
    pub async fn add_points(&self, user_id: &str, delta: i64) -> Result<()> {
        self.local.add_points(user_id, delta)?;
        if let Err(e) = self.cloud.add_points(user_id, delta).await {
            if self.cloud.is_configured() {
                log::warn!("remote point award failed for user {user_id}: {e}");
            }
        }
        Ok(())
    }

    // --- vehicles ---

    pub async fn get_user_vehicles(&self, user_id: &str) -> Result<Vec<Vehicle>> {
        if self.cloud.is_configured() {
            match self.cloud.list_user_vehicles(user_id).await {
                Ok(list) => return Ok(list),
                Err(e) => log::warn!("remote read failed, using local vehicles: {e}"),
            }
        }
        Ok(self
            .local
            .vehicles()?
            .into_iter()
            .filter(|v| v.user_id == user_id)
            .collect())
    }

    pub async fn add_vehicle(&self, vehicle: &Vehicle) -> Result<()> {
        self.local.push_vehicle(vehicle)?;
        if let Err(e) = self.cloud.insert_vehicle(vehicle).await {
            if self.cloud.is_configured() {
                log::warn!("remote write failed for vehicle {}: {e}", vehicle.id);
            }
        }
        Ok(())
    }

    pub async fn delete_vehicle(&self, vehicle_id: &str) -> Result<()> {
        self.local.remove_vehicle(vehicle_id)?;
        if let Err(e) = self.cloud.delete_vehicle(vehicle_id).await {
            if self.cloud.is_configured() {
                log::warn!("remote delete failed for vehicle {vehicle_id}: {e}");
            }
        }
        Ok(())
    }

    // --- establishment ---

    pub async fn get_establishment_info(&self) -> Result<EstablishmentInfo> {
        if self.cloud.is_configured() {
            match self.cloud.get_establishment().await {
                Ok(Some(info)) => return Ok(info),
                Ok(None) => {}
                Err(e) => log::warn!("remote read failed, using local establishment: {e}"),
            }
        }
        Ok(self.local.establishment()?.unwrap_or_default())
    }

    pub async fn save_establishment_info(&self, info: &EstablishmentInfo) -> Result<()> {
        self.local.set_establishment(info)?;
        if let Err(e) = self.cloud.save_establishment(info).await {
            if self.cloud.is_configured() {
                log::warn!("remote write failed for establishment: {e}");
            }
        }
        Ok(())
    }
}
