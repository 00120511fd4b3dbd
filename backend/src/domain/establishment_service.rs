//! Singleton establishment profile.

use anyhow::Result;
use std::sync::Arc;

use super::models::EstablishmentInfo;
use super::sync::{SharedCache, Synchronizer};
use crate::storage::EntityStore;

pub struct EstablishmentService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    sync: Arc<Synchronizer>,
}

impl EstablishmentService {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache, sync: Arc<Synchronizer>) -> Self {
        Self { store, cache, sync }
    }

    pub async fn get(&self) -> EstablishmentInfo {
        self.cache.read().await.establishment.clone()
    }

    pub async fn save(&self, info: EstablishmentInfo) -> Result<()> {
        log::info!("updating establishment profile ({})", info.name);
        self.cache.write().await.establishment = info.clone();
        if let Err(e) = self.store.save_establishment_info(&info).await {
            log::error!("persisting establishment profile failed, resyncing: {e}");
        }
        self.sync.sync_all().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sync::build_sync;

    async fn setup() -> (EstablishmentService, Arc<EntityStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(EntityStore::new(None, dir.path()).unwrap());
        let (cache, sync) = build_sync(store.clone());
        sync.sync_all().await;
        let service = EstablishmentService::new(store.clone(), cache, sync);
        (service, store, dir)
    }

    #[tokio::test]
    async fn defaults_apply_until_first_save() {
        let (service, _store, _dir) = setup().await;
        assert_eq!(service.get().await.name, "Lava Jato Pro");
    }

    #[tokio::test]
    async fn save_round_trips_through_store() {
        let (service, store, _dir) = setup().await;
        let mut info = service.get().await;
        info.name = "Lava Jato do Zé".into();
        info.phone = "5531911112222".into();
        service.save(info).await.unwrap();

        let stored = store.get_establishment_info().await.unwrap();
        assert_eq!(stored.name, "Lava Jato do Zé");
        assert_eq!(stored.phone, "5531911112222");
    }
}
