//! Snapshot diffing for optimistically-updated collections.
//!
//! Admin and client flows mutate an in-memory collection first and persist
//! afterwards. The store only wants the single record that changed, so this
//! module recovers it by comparing the pre- and post-mutation snapshots.
//!
//! Equality is the structural `PartialEq` derived on each entity type. An
//! earlier incarnation of this logic compared ids only, which made edits that
//! keep the id invisible; field-level comparison is what distinguishes an
//! edit from "nothing happened".

use super::models::Entity;

/// Outcome of diffing two snapshots of the same collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDelta<T> {
    /// True when the mutation removed a record.
    pub is_delete: bool,
    /// The inserted, edited or deleted record; `None` when the snapshots are
    /// indistinguishable.
    pub changed: Option<T>,
}

/// Identify the single record that differs between `old` and `new`.
///
/// Callers mutate exactly one logical record between the two snapshots.
/// When several records differ the first match in list order is returned,
/// best-effort; bulk diffs are deliberately unsupported.
pub fn detect_change<T>(old: &[T], new: &[T]) -> ListDelta<T>
where
    T: Entity + PartialEq + Clone,
{
    let is_delete = new.len() < old.len();

    let changed = if is_delete {
        old.iter()
            .find(|o| !new.iter().any(|n| n.id() == o.id()))
            .cloned()
    } else {
        new.iter()
            .find(|n| match old.iter().find(|o| o.id() == n.id()) {
                None => true,       // pure insertion
                Some(o) => o != *n, // edit that kept the id
            })
            .cloned()
    };

    ListDelta { is_delete, changed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ExpenseEntry, ServiceItem};

    fn service(id: &str, label: &str, price: f64) -> ServiceItem {
        ServiceItem {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            price,
            price_medium: None,
            price_large: None,
            old_price: None,
        }
    }

    #[test]
    fn detects_a_pure_insertion() {
        let old = vec![service("a", "Simples", 30.0)];
        let new = vec![service("a", "Simples", 30.0), service("b", "Completa", 60.0)];

        let delta = detect_change(&old, &new);
        assert!(!delta.is_delete);
        assert_eq!(delta.changed.unwrap().id, "b");
    }

    #[test]
    fn detects_an_edit_that_keeps_the_id() {
        let old = vec![service("a", "Simples", 30.0), service("b", "Completa", 60.0)];
        let mut new = old.clone();
        new[1].price = 65.0;

        let delta = detect_change(&old, &new);
        assert!(!delta.is_delete);
        let changed = delta.changed.unwrap();
        assert_eq!(changed.id, "b");
        assert_eq!(changed.price, 65.0);
    }

    #[test]
    fn detects_a_deletion_and_returns_the_removed_record() {
        let old = vec![service("a", "Simples", 30.0), service("b", "Completa", 60.0)];
        let new = vec![old[1].clone()];

        let delta = detect_change(&old, &new);
        assert!(delta.is_delete);
        assert_eq!(delta.changed.unwrap().id, "a");
    }

    #[test]
    fn identical_snapshots_yield_no_change() {
        let old = vec![service("a", "Simples", 30.0)];
        let delta = detect_change(&old, &old.clone());
        assert!(!delta.is_delete);
        assert!(delta.changed.is_none());
    }

    #[test]
    fn insertion_into_an_empty_collection() {
        let old: Vec<ExpenseEntry> = vec![];
        let new = vec![ExpenseEntry {
            id: "d1".into(),
            amount: 120.0,
            note: "Sabão".into(),
            incurred_on: "2025-06-01T12:00:00Z".into(),
        }];

        let delta = detect_change(&old, &new);
        assert!(!delta.is_delete);
        assert_eq!(delta.changed.unwrap().id, "d1");
    }

    #[test]
    fn deleting_the_last_record_empties_the_collection() {
        let old = vec![service("a", "Simples", 30.0)];
        let new: Vec<ServiceItem> = vec![];

        let delta = detect_change(&old, &new);
        assert!(delta.is_delete);
        assert_eq!(delta.changed.unwrap().id, "a");
    }

    #[test]
    fn multiple_edits_return_the_first_match_best_effort() {
        let old = vec![service("a", "Simples", 30.0), service("b", "Completa", 60.0)];
        let mut new = old.clone();
        new[0].price = 35.0;
        new[1].price = 65.0;

        // Undefined territory per the contract; we only pin first-match order.
        let delta = detect_change(&old, &new);
        assert_eq!(delta.changed.unwrap().id, "a");
    }
}
