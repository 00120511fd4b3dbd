//! Admin-managed service catalog.

use anyhow::Result;
use std::sync::Arc;

use super::change_detector::detect_change;
use super::models::ServiceItem;
use super::sync::{SharedCache, Synchronizer};
use crate::storage::EntityStore;

pub struct CatalogService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    sync: Arc<Synchronizer>,
}

impl CatalogService {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache, sync: Arc<Synchronizer>) -> Self {
        Self { store, cache, sync }
    }

    pub async fn list(&self) -> Vec<ServiceItem> {
        self.cache.read().await.services.clone()
    }

    /// Replace the catalog with an optimistically edited copy. Price edits,
    /// promotional `old_price` toggles and whole-item removals all arrive
    /// through here.
    pub async fn replace(&self, new_list: Vec<ServiceItem>) -> Result<()> {
        let old_list = self.cache.read().await.services.clone();
        let delta = detect_change(&old_list, &new_list);

        self.cache.write().await.services = new_list.clone();
        if let Err(e) = self
            .store
            .save_services(&new_list, delta.changed.as_ref(), delta.is_delete)
            .await
        {
            log::error!("persisting catalog update failed, resyncing: {e}");
        }
        self.sync.sync_all().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sync::build_sync;

    async fn setup() -> (CatalogService, Arc<EntityStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(EntityStore::new(None, dir.path()).unwrap());
        store.init("31999990000", "3003").await.unwrap();
        let (cache, sync) = build_sync(store.clone());
        sync.sync_all().await;
        let service = CatalogService::new(store.clone(), cache, sync);
        (service, store, dir)
    }

    #[tokio::test]
    async fn seeded_catalog_is_visible_after_sync() {
        let (service, _store, _dir) = setup().await;
        let items = service.list().await;
        assert_eq!(items.len(), 4);
        assert!(items.iter().any(|s| s.label == "Lavagem Simples"));
    }

    #[tokio::test]
    async fn price_edit_round_trips_through_store() {
        let (service, store, _dir) = setup().await;
        let mut items = service.list().await;
        items[0].price = 35.0;
        items[0].old_price = Some(30.0);
        service.replace(items).await.unwrap();

        let stored = store.list_services().await.unwrap();
        assert_eq!(stored[0].price, 35.0);
        assert_eq!(stored[0].old_price, Some(30.0));
    }

    #[tokio::test]
    async fn item_removal_round_trips_through_store() {
        let (service, store, _dir) = setup().await;
        let mut items = service.list().await;
        items.pop();
        service.replace(items).await.unwrap();
        assert_eq!(store.list_services().await.unwrap().len(), 3);
    }
}
