//! Appointment lifecycle engine.
//!
//! All appointment mutations funnel through [`AppointmentService::apply_update`]:
//! it receives the post-mutation snapshot of the whole collection, works out
//! which record changed and which status edge (if any) was crossed, fires the
//! cascades that hang off those edges, persists the single changed record and
//! finally resynchronizes from the store.
//!
//! The two cascades are independent best-effort writes; a failed point award
//! does not undo a synthesized revenue entry or the status change itself.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

use super::change_detector::detect_change;
use super::commands::CreateAppointmentCommand;
use super::error::DomainError;
use super::models::{
    new_id, Appointment, AppointmentStatus, PaymentMethod, RevenueEntry, VehicleSize,
};
use super::sync::{SharedCache, Synchronizer};
use crate::storage::EntityStore;

/// Loyalty points awarded when a client's appointment completes.
pub const COMPLETION_POINTS: i64 = 10;

pub struct AppointmentService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    sync: Arc<Synchronizer>,
}

impl AppointmentService {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache, sync: Arc<Synchronizer>) -> Self {
        Self { store, cache, sync }
    }

    /// Insert a new `Pending` appointment.
    ///
    /// The appointment is appended to the in-memory collection before the
    /// store confirms; if persistence fails the collection is reloaded from
    /// the store and the optimistic insert may be silently reverted.
    pub async fn create(&self, cmd: CreateAppointmentCommand) -> Result<Appointment> {
        if cmd.customer_name.trim().is_empty() {
            return Err(DomainError::MissingField("customer_name").into());
        }
        if cmd.service_label.trim().is_empty() {
            return Err(DomainError::MissingField("service").into());
        }
        if cmd.scheduled_at.trim().is_empty() {
            return Err(DomainError::MissingField("scheduled_at").into());
        }

        let appointment = Appointment {
            id: new_id(),
            user_id: cmd.user_id,
            customer_name: cmd.customer_name,
            customer_phone: cmd.customer_phone,
            service_label: cmd.service_label,
            price: cmd.price,
            scheduled_at: cmd.scheduled_at,
            status: AppointmentStatus::Pending,
            created_at: Utc::now().to_rfc3339(),
            vehicle_snapshot: cmd.vehicle_snapshot,
        };
        log::info!(
            "creating appointment {} ({} at {})",
            appointment.id,
            appointment.service_label,
            appointment.scheduled_at
        );

        let snapshot = {
            let mut cache = self.cache.write().await;
            cache.appointments.push(appointment.clone());
            cache.appointments.clone()
        };

        if let Err(e) = self
            .store
            .save_appointments(&snapshot, Some(&appointment), false)
            .await
        {
            log::error!("persisting appointment {} failed, resyncing: {e}", appointment.id);
        }
        self.sync.sync_all().await;

        Ok(appointment)
    }

    /// Apply an optimistically updated appointment collection.
    ///
    /// This is the admin path: the caller hands over the full new list (one
    /// record inserted, edited or deleted). Status edges are validated
    /// against the state machine before anything is written.
    pub async fn apply_update(&self, new_list: Vec<Appointment>) -> Result<()> {
        let old_list = self.cache.read().await.appointments.clone();

        // Reject illegal status edges up front, before the optimistic swap.
        let delta = detect_change(&old_list, &new_list);
        if !delta.is_delete {
            if let Some(changed) = &delta.changed {
                if let Some(before) = old_list.iter().find(|o| o.id == changed.id) {
                    if before.status != changed.status
                        && !before.status.can_transition(changed.status)
                    {
                        return Err(DomainError::InvalidTransition {
                            from: before.status,
                            to: changed.status,
                        }
                        .into());
                    }
                }
            }
        }

        // Status-edge cascades are detected on the snapshot pair, not on
        // steady state: an already-completed appointment that stays completed
        // crosses no edge and must award nothing again.
        let completed_edge = new_list
            .iter()
            .find(|n| {
                old_list.iter().any(|o| {
                    o.id == n.id
                        && o.status != AppointmentStatus::Completed
                        && n.status == AppointmentStatus::Completed
                })
            })
            .cloned();
        let confirmed_edge = new_list
            .iter()
            .find(|n| {
                old_list.iter().any(|o| {
                    o.id == n.id
                        && o.status != AppointmentStatus::Confirmed
                        && n.status == AppointmentStatus::Confirmed
                })
            })
            .cloned();

        self.cache.write().await.appointments = new_list.clone();

        if let Some(completed) = &completed_edge {
            if let Some(user_id) = &completed.user_id {
                log::info!(
                    "appointment {} completed, awarding {COMPLETION_POINTS} points to {user_id}",
                    completed.id
                );
                if let Err(e) = self.store.add_points(user_id, COMPLETION_POINTS).await {
                    log::error!("point award for user {user_id} failed (not retried): {e}");
                }
            }
        }

        if let Some(confirmed) = &confirmed_edge {
            // Confirmed bookings count as revenue immediately, independent of
            // completion. Deliberate business rule inherited from production;
            // flagged for product review in DESIGN.md, not changed here.
            if confirmed.price > 0.0 {
                if let Err(e) = self.book_revenue_for(confirmed).await {
                    log::error!(
                        "revenue synthesis for appointment {} failed (not retried): {e}",
                        confirmed.id
                    );
                }
            }
        }

        if let Some(item) = &delta.changed {
            if let Err(e) = self
                .store
                .save_appointments(&new_list, Some(item), delta.is_delete)
                .await
            {
                log::error!("persisting appointment update failed, resyncing: {e}");
            }
        }

        self.sync.sync_all().await;
        Ok(())
    }

    /// Move one appointment along its lifecycle.
    ///
    /// Invalid edges (`completed -> pending`, skipping `confirmed`, …) are
    /// rejected explicitly rather than silently ignored.
    pub async fn transition(
        &self,
        appointment_id: &str,
        new_status: AppointmentStatus,
    ) -> Result<Appointment> {
        let old_list = self.cache.read().await.appointments.clone();
        let current = old_list
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| DomainError::AppointmentNotFound(appointment_id.to_string()))?;

        if !current.status.can_transition(new_status) {
            return Err(DomainError::InvalidTransition {
                from: current.status,
                to: new_status,
            }
            .into());
        }

        let mut updated = current.clone();
        updated.status = new_status;
        let new_list: Vec<Appointment> = old_list
            .iter()
            .map(|a| {
                if a.id == appointment_id {
                    updated.clone()
                } else {
                    a.clone()
                }
            })
            .collect();

        self.apply_update(new_list).await?;
        Ok(updated)
    }

    /// Synthesize the revenue entry for a freshly confirmed appointment. The
    /// appointment carries neither vehicle size nor payment method, so both
    /// take their documented defaults.
    async fn book_revenue_for(&self, confirmed: &Appointment) -> Result<()> {
        let entry = RevenueEntry {
            id: new_id(),
            service_type: confirmed.service_label.clone(),
            vehicle_size: VehicleSize::Medium,
            amount: confirmed.price,
            payment: PaymentMethod::Cash,
            recorded_at: Utc::now().to_rfc3339(),
        };
        log::info!(
            "appointment {} confirmed, booking revenue {} (R$ {:.2})",
            confirmed.id,
            entry.id,
            entry.amount
        );

        let snapshot = {
            let mut cache = self.cache.write().await;
            cache.revenue.push(entry.clone());
            cache.revenue.clone()
        };
        self.store.save_revenue(&snapshot, Some(&entry), false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{User, UserRole};
    use crate::domain::sync::build_sync;

    async fn setup() -> (AppointmentService, Arc<EntityStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(EntityStore::new(None, dir.path()).unwrap());
        let (cache, sync) = build_sync(store.clone());
        let service = AppointmentService::new(store.clone(), cache, sync);
        (service, store, dir)
    }

    async fn seed_client(store: &EntityStore) -> User {
        let user = User {
            id: "u1".into(),
            name: "Maria".into(),
            phone: "31988887777".into(),
            password: "segredo".into(),
            role: UserRole::Client,
            points: 0,
        };
        assert!(store.register(&user).await.unwrap());
        user
    }

    fn booking_cmd(user_id: Option<&str>) -> CreateAppointmentCommand {
        CreateAppointmentCommand {
            user_id: user_id.map(str::to_string),
            customer_name: "Maria".into(),
            customer_phone: "31988887777".into(),
            service_label: "Lavagem Completa".into(),
            price: 70.0,
            scheduled_at: "2025-06-01T14:00:00".into(),
            vehicle_snapshot: Some("Honda Civic Branco (ABC-1234)".into()),
        }
    }

    #[tokio::test]
    async fn create_inserts_a_pending_appointment() {
        let (service, store, _dir) = setup().await;
        let created = service.create(booking_cmd(None)).await.unwrap();

        assert_eq!(created.status, AppointmentStatus::Pending);
        let stored = store.list_appointments().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, created.id);
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let (service, store, _dir) = setup().await;
        let mut cmd = booking_cmd(None);
        cmd.service_label = String::new();

        let err = service.create(cmd).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::MissingField("service"))
        );
        assert!(store.list_appointments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn confirming_books_revenue_exactly_once() {
        let (service, store, _dir) = setup().await;
        let created = service.create(booking_cmd(None)).await.unwrap();

        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();

        let revenue = store.list_revenue().await.unwrap();
        assert_eq!(revenue.len(), 1);
        assert_eq!(revenue[0].service_type, "Lavagem Completa");
        assert_eq!(revenue[0].amount, 70.0);
        assert_eq!(revenue[0].vehicle_size, VehicleSize::Medium);
        assert_eq!(revenue[0].payment, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn confirming_a_free_appointment_books_no_revenue() {
        let (service, store, _dir) = setup().await;
        let mut cmd = booking_cmd(None);
        cmd.price = 0.0;
        let created = service.create(cmd).await.unwrap();

        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        assert!(store.list_revenue().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completing_awards_ten_points_once() {
        let (service, store, _dir) = setup().await;
        let user = seed_client(&store).await;
        let created = service.create(booking_cmd(Some(&user.id))).await.unwrap();

        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap();

        let stored = store.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.points, 10);

        // A second completion attempt is rejected and awards nothing.
        let err = service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidTransition { .. })
        ));
        let stored = store.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.points, 10);
    }

    #[tokio::test]
    async fn resubmitting_an_unchanged_list_awards_nothing() {
        let (service, store, _dir) = setup().await;
        let user = seed_client(&store).await;
        let created = service.create(booking_cmd(Some(&user.id))).await.unwrap();
        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap();

        // Steady-state completed list crosses no edge.
        let current = service.cache.read().await.appointments.clone();
        service.apply_update(current).await.unwrap();

        let stored = store.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.points, 10);
        assert_eq!(store.list_revenue().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn skipping_confirmed_is_rejected() {
        let (service, _store, _dir) = setup().await;
        let created = service.create(booking_cmd(None)).await.unwrap();

        let err = service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::InvalidTransition {
                from: AppointmentStatus::Pending,
                to: AppointmentStatus::Completed,
            })
        );
    }

    #[tokio::test]
    async fn cancelled_appointments_cannot_be_revived() {
        let (service, _store, _dir) = setup().await;
        let created = service.create(booking_cmd(None)).await.unwrap();
        service
            .transition(&created.id, AppointmentStatus::Cancelled)
            .await
            .unwrap();

        for target in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
        ] {
            assert!(service.transition(&created.id, target).await.is_err());
        }
    }

    #[tokio::test]
    async fn transition_of_unknown_appointment_is_rejected() {
        let (service, _store, _dir) = setup().await;
        let err = service
            .transition("ghost", AppointmentStatus::Confirmed)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::AppointmentNotFound("ghost".into()))
        );
    }

    #[tokio::test]
    async fn completing_a_walk_in_without_account_awards_nothing() {
        let (service, store, _dir) = setup().await;
        let created = service.create(booking_cmd(None)).await.unwrap();
        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap();
        // No owning user: only the revenue cascade fires.
        assert_eq!(store.list_revenue().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn full_lifecycle_scenario_points_and_revenue() {
        let (service, store, _dir) = setup().await;
        let user = seed_client(&store).await;
        assert_eq!(store.get_user(&user.id).await.unwrap().unwrap().points, 0);

        let created = service.create(booking_cmd(Some(&user.id))).await.unwrap();
        service
            .transition(&created.id, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        service
            .transition(&created.id, AppointmentStatus::Completed)
            .await
            .unwrap();

        assert_eq!(store.get_user(&user.id).await.unwrap().unwrap().points, 10);
        assert_eq!(store.list_revenue().await.unwrap().len(), 1);
        let appointments = store.list_appointments().await.unwrap();
        assert_eq!(appointments[0].status, AppointmentStatus::Completed);
    }

    #[tokio::test]
    async fn admin_edit_without_status_change_fires_no_cascade() {
        let (service, store, _dir) = setup().await;
        let user = seed_client(&store).await;
        let created = service.create(booking_cmd(Some(&user.id))).await.unwrap();

        let mut updated_list = service.cache.read().await.appointments.clone();
        updated_list[0].customer_phone = "31900001111".into();
        service.apply_update(updated_list).await.unwrap();

        assert_eq!(store.get_user(&user.id).await.unwrap().unwrap().points, 0);
        assert!(store.list_revenue().await.unwrap().is_empty());
        assert_eq!(
            store.list_appointments().await.unwrap()[0].customer_phone,
            "31900001111"
        );
        let _ = created;
    }
}
