//! Manual revenue entries and the dashboard totals.
//!
//! Unlike the entries synthesized on appointment confirmation, manual entries
//! carry an explicit vehicle size and payment method chosen by the admin.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

use super::change_detector::detect_change;
use super::commands::CreateRevenueCommand;
use super::models::{new_id, RevenueEntry};
use super::sync::{SharedCache, Synchronizer};
use crate::storage::EntityStore;

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub profit: f64,
}

pub struct RevenueService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    sync: Arc<Synchronizer>,
}

impl RevenueService {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache, sync: Arc<Synchronizer>) -> Self {
        Self { store, cache, sync }
    }

    pub async fn list(&self) -> Vec<RevenueEntry> {
        self.cache.read().await.revenue.clone()
    }

    pub async fn create(&self, cmd: CreateRevenueCommand) -> Result<RevenueEntry> {
        let entry = RevenueEntry {
            id: new_id(),
            service_type: cmd.service_type,
            vehicle_size: cmd.vehicle_size,
            amount: cmd.amount,
            payment: cmd.payment,
            recorded_at: Utc::now().to_rfc3339(),
        };
        log::info!("recording revenue {} (R$ {:.2})", entry.id, entry.amount);

        let mut new_list = self.cache.read().await.revenue.clone();
        new_list.push(entry.clone());
        self.replace(new_list).await?;
        Ok(entry)
    }

    /// Replace the whole collection with an optimistically edited copy.
    pub async fn replace(&self, new_list: Vec<RevenueEntry>) -> Result<()> {
        let old_list = self.cache.read().await.revenue.clone();
        let delta = detect_change(&old_list, &new_list);

        self.cache.write().await.revenue = new_list.clone();
        if let Err(e) = self
            .store
            .save_revenue(&new_list, delta.changed.as_ref(), delta.is_delete)
            .await
        {
            log::error!("persisting revenue update failed, resyncing: {e}");
        }
        self.sync.sync_all().await;
        Ok(())
    }

    pub async fn summary(&self) -> FinancialSummary {
        let cache = self.cache.read().await;
        let total_revenue: f64 = cache.revenue.iter().map(|r| r.amount).sum();
        let total_expenses: f64 = cache.expenses.iter().map(|e| e.amount).sum();
        FinancialSummary {
            total_revenue,
            total_expenses,
            profit: total_revenue - total_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ExpenseEntry, PaymentMethod, VehicleSize};
    use crate::domain::sync::build_sync;

    async fn setup() -> (RevenueService, Arc<EntityStore>, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(EntityStore::new(None, dir.path()).unwrap());
        let (cache, sync) = build_sync(store.clone());
        let service = RevenueService::new(store.clone(), cache, sync);
        (service, store, dir)
    }

    fn manual_cmd() -> CreateRevenueCommand {
        CreateRevenueCommand {
            service_type: "Polimento Técnico".into(),
            vehicle_size: VehicleSize::Large,
            amount: 420.0,
            payment: PaymentMethod::Pix,
        }
    }

    #[tokio::test]
    async fn create_keeps_explicit_size_and_payment() {
        let (service, store, _dir) = setup().await;
        let entry = service.create(manual_cmd()).await.unwrap();

        assert_eq!(entry.vehicle_size, VehicleSize::Large);
        assert_eq!(entry.payment, PaymentMethod::Pix);
        let stored = store.list_revenue().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount, 420.0);
    }

    #[tokio::test]
    async fn replace_persists_deletions() {
        let (service, store, _dir) = setup().await;
        service.create(manual_cmd()).await.unwrap();
        service.create(manual_cmd()).await.unwrap();

        let mut remaining = service.list().await;
        remaining.remove(0);
        service.replace(remaining.clone()).await.unwrap();

        let stored = store.list_revenue().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, remaining[0].id);
    }

    #[tokio::test]
    async fn summary_subtracts_expenses_from_revenue() {
        let (service, store, _dir) = setup().await;
        service.create(manual_cmd()).await.unwrap();
        let expenses = vec![ExpenseEntry {
            id: "e1".into(),
            amount: 120.0,
            note: "Shampoo automotivo".into(),
            incurred_on: "2025-06-01T12:00:00Z".into(),
        }];
        store.save_expenses(&expenses, Some(&expenses[0]), false).await.unwrap();
        service.sync.sync_all().await;

        let summary = service.summary().await;
        assert_eq!(summary.total_revenue, 420.0);
        assert_eq!(summary.total_expenses, 120.0);
        assert_eq!(summary.profit, 300.0);
    }
}
