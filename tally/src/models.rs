//! Internal storage rows
//!
//! Not part of the public interface; used between the database layer and the
//! trainer/suggester.

use crate::interface::{BudgetId, CategoryId, PurchaseId};
use chrono::NaiveDate;

/// A purchase as read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPurchase {
    pub id: PurchaseId,
    pub budget_id: BudgetId,
    pub purchase_date: NaiveDate,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl StoredPurchase {
    /// Description and category, when the purchase carries both
    pub fn training_pair(&self) -> Option<(&str, CategoryId)> {
        match (self.description.as_deref(), self.category_id) {
            (Some(description), Some(category_id)) if !description.is_empty() => {
                Some((description, category_id))
            }
            _ => None,
        }
    }
}

/// A frequency row matched by a suggestion query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedTermRow {
    pub term: String,
    pub category_id: CategoryId,
    pub frequency: u64,
    pub gram_length: usize,
}
