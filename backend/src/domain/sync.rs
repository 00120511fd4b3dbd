//! Polling synchronization with the entity store.
//!
//! There is no push channel for data changes: one client observes another's
//! writes only because every client periodically re-reads the collections
//! from the store. The synchronizer also runs once at startup and after
//! every mutation, and doubles as the recovery path when a persisted write
//! fails (reload from the source of truth instead of fine-grained rollback).

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::models::{
    Appointment, EstablishmentInfo, ExpenseEntry, RevenueEntry, ServiceItem,
};
use crate::storage::EntityStore;

/// The in-memory snapshot every view and mutation works against.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub appointments: Vec<Appointment>,
    pub revenue: Vec<RevenueEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub services: Vec<ServiceItem>,
    pub establishment: EstablishmentInfo,
}

pub type SharedCache = Arc<RwLock<Collections>>;

pub struct Synchronizer {
    store: Arc<EntityStore>,
    cache: SharedCache,
}

impl Synchronizer {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache) -> Self {
        Self { store, cache }
    }

    /// Reload every collection from the store. A collection whose read fails
    /// keeps its previous snapshot; reads never hard-fail the caller.
    pub async fn sync_all(&self) {
        let mut cache = self.cache.write().await;
        match self.store.list_appointments().await {
            Ok(list) => cache.appointments = list,
            Err(e) => log::warn!("sync: keeping stale appointments: {e}"),
        }
        match self.store.list_revenue().await {
            Ok(list) => cache.revenue = list,
            Err(e) => log::warn!("sync: keeping stale revenue: {e}"),
        }
        match self.store.list_expenses().await {
            Ok(list) => cache.expenses = list,
            Err(e) => log::warn!("sync: keeping stale expenses: {e}"),
        }
        match self.store.list_services().await {
            Ok(list) => cache.services = list,
            Err(e) => log::warn!("sync: keeping stale services: {e}"),
        }
        match self.store.get_establishment_info().await {
            Ok(info) => cache.establishment = info,
            Err(e) => log::warn!("sync: keeping stale establishment info: {e}"),
        }
    }

    /// Background polling loop on a fixed interval.
    pub fn spawn_polling(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The startup sync already ran; skip the immediate first tick.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.sync_all().await;
            }
        })
    }
}

/// Liveness indicator fed by a periodic store ping, independent of the data
/// polling cadence.
#[derive(Default)]
pub struct Heartbeat {
    alive: AtomicBool,
    last_ok_ms: AtomicI64,
}

impl Heartbeat {
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Epoch millis of the last successful ping, if any.
    pub fn last_ok_ms(&self) -> Option<i64> {
        match self.last_ok_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => Some(ms),
        }
    }

    pub fn record(&self, ok: bool) {
        self.alive.store(ok, Ordering::Relaxed);
        if ok {
            self.last_ok_ms
                .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
        }
    }

    pub fn spawn(
        self: Arc<Self>,
        store: Arc<EntityStore>,
        every: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                self.record(store.ping().await);
            }
        })
    }
}

/// Fresh cache + synchronizer pair over a store.
pub fn build_sync(store: Arc<EntityStore>) -> (SharedCache, Arc<Synchronizer>) {
    let cache: SharedCache = Arc::new(RwLock::new(Collections::default()));
    let sync = Arc::new(Synchronizer::new(store, cache.clone()));
    (cache, sync)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AppointmentStatus;

    fn local_store() -> (Arc<EntityStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(EntityStore::new(None, dir.path()).unwrap());
        (store, dir)
    }

    #[tokio::test]
    async fn sync_all_fills_the_cache_from_the_store() {
        let (store, _dir) = local_store();
        let list = vec![Appointment {
            id: "a1".into(),
            user_id: None,
            customer_name: "João".into(),
            customer_phone: "31977776666".into(),
            service_label: "Lavagem Simples".into(),
            price: 30.0,
            scheduled_at: "2025-06-02T09:00:00".into(),
            status: AppointmentStatus::Pending,
            created_at: "2025-06-01T08:00:00Z".into(),
            vehicle_snapshot: None,
        }];
        store.save_appointments(&list, Some(&list[0]), false).await.unwrap();

        let (cache, sync) = build_sync(store);
        assert!(cache.read().await.appointments.is_empty());

        sync.sync_all().await;
        assert_eq!(cache.read().await.appointments.len(), 1);
    }

    #[test]
    fn heartbeat_starts_dead_and_records_beats() {
        let hb = Heartbeat::default();
        assert!(!hb.is_alive());
        assert!(hb.last_ok_ms().is_none());

        hb.record(true);
        assert!(hb.is_alive());
        assert!(hb.last_ok_ms().is_some());

        let last = hb.last_ok_ms();
        hb.record(false);
        assert!(!hb.is_alive());
        // A failed beat keeps the last success timestamp.
        assert_eq!(hb.last_ok_ms(), last);
    }
}
