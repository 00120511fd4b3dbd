//! Expense ledger entries.
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: String,
    pub amount: f64,
    /// Free-text note ("observação").
    pub note: String,
    /// Midday-UTC timestamp, see [`normalize_expense_date`].
    pub incurred_on: String,
}

impl Entity for ExpenseEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Normalize date-only expense input to midday UTC.
///
/// Date pickers hand over `YYYY-MM-DD`; anchoring at 12:00 UTC keeps the
/// calendar day stable when the value is later rendered in a western
/// timezone, which midnight would roll back by a day.
pub fn normalize_expense_date(input: &str) -> Result<String> {
    let day = input.get(..10).ok_or_else(|| anyhow!("invalid expense date: {input}"))?;
    let parsed = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| anyhow!("invalid expense date {input}: {e}"))?;
    Ok(format!("{}T12:00:00Z", parsed.format("%Y-%m-%d")))
}
