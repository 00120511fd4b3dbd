//! Operating expenses.

use anyhow::Result;
use std::sync::Arc;

use super::change_detector::detect_change;
use super::commands::CreateExpenseCommand;
use super::models::{new_id, normalize_expense_date, ExpenseEntry};
use super::sync::{SharedCache, Synchronizer};
use crate::storage::EntityStore;

pub struct ExpenseService {
    store: Arc<EntityStore>,
    cache: SharedCache,
    sync: Arc<Synchronizer>,
}

impl ExpenseService {
    pub fn new(store: Arc<EntityStore>, cache: SharedCache, sync: Arc<Synchronizer>) -> Self {
        Self { store, cache, sync }
    }

    pub async fn list(&self) -> Vec<ExpenseEntry> {
        self.cache.read().await.expenses.clone()
    }

    /// Record an expense. The date is pinned to midday UTC so it lands on
    /// the same calendar day in every Brazilian timezone.
    pub async fn create(&self, cmd: CreateExpenseCommand) -> Result<ExpenseEntry> {
        let entry = ExpenseEntry {
            id: new_id(),
            amount: cmd.amount,
            note: cmd.note,
            incurred_on: normalize_expense_date(&cmd.date)?,
        };
        log::info!("recording expense {} (R$ {:.2})", entry.id, entry.amount);

        let mut new_list = self.cache.read().await.expenses.clone();
        new_list.push(entry.clone());
        self.replace(new_list).await?;
        Ok(entry)
    }

    pub async fn replace(&self, new_list: Vec<ExpenseEntry>) -> Result<()> {
        let old_list = self.cache.read().await.expenses.clone();
        let delta = detect_change(&old_list, &new_list);

        self.cache.write().await.expenses = new_list.clone();
        if let Err(e) = self
            .store
            .save_expenses(&new_list, delta.changed.as_ref(), delta.is_delete)
            .await
        {
            log::error!("persisting expense update failed, resyncing: {e}");
        }
        self.sync.sync_all().await;
        Ok(())
    }
}
