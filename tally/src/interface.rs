//! Tally Public Interface
//!
//! Records, the error type and the service trait the surrounding budgeting
//! application programs against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A budget: the scope that owns categories, purchases and their term statistics
pub type BudgetId = i64;
pub type CategoryId = i64;
pub type PurchaseId = i64;

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// Relevance weight attached to every n-gram of a given length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermType {
    pub gram_length: usize,
    pub weight: f64,
}

/// One counter of the term-frequency index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTermFrequency {
    pub category_id: CategoryId,
    pub term: String,
    pub gram_length: usize,
    pub frequency: u64,
}

/// A purchase as handed over by the host application for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub purchase_date: NaiveDate,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl NewPurchase {
    pub fn new(
        purchase_date: NaiveDate,
        amount_cents: i64,
        description: impl Into<String>,
        category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            purchase_date,
            amount_cents,
            description: Some(description.into()),
            category_id,
        }
    }
}

/// One line of a batch suggestion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyseRequest {
    pub index: u64,
    pub description: String,
}

/// Suggestion for the request line with the same `index`; `None` means no suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyseResult {
    pub index: u64,
    pub category: Option<CategoryId>,
}

/// Error type for Tally operations
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Operation cancelled")]
    Cancelled,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// Auto-categorization of purchases within a budget.
/// Implemented by `CategorizerStore`.
#[async_trait::async_trait]
pub trait CategorizerApi: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────────
    // Classifier
    // ─────────────────────────────────────────────────────────────────────────────

    /// Count the terms of `description` against `category_id`.
    /// No-op when the description is empty or the category is absent.
    fn train(&self, description: &str, category_id: Option<CategoryId>) -> Result<(), TallyError>;

    /// Best-guess category for `description` among the budget's categories
    fn suggest(&self, budget_id: BudgetId, description: &str) -> Result<Option<CategoryId>, TallyError>;

    /// Batch form of `suggest`. Output preserves input order and indices.
    async fn analyse(
        &self,
        budget_id: BudgetId,
        items: Vec<AnalyseRequest>,
    ) -> Result<Vec<AnalyseResult>, TallyError>;

    /// Rebuild the budget's term statistics from its purchases.
    /// Returns the number of purchases replayed.
    fn reprocess(&self, budget_id: BudgetId) -> Result<u64, TallyError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Budgets, categories and purchases
    // ─────────────────────────────────────────────────────────────────────────────

    fn create_budget(&self, name: &str) -> Result<BudgetId, TallyError>;

    /// Delete a budget with its categories, purchases and term statistics
    fn delete_budget(&self, budget_id: BudgetId) -> Result<(), TallyError>;

    fn create_category(&self, budget_id: BudgetId, name: &str) -> Result<CategoryId, TallyError>;

    /// Delete a category and its term statistics. Its purchases become uncategorized.
    fn delete_category(&self, category_id: CategoryId) -> Result<(), TallyError>;

    /// Persist a purchase, training on it when it is categorized
    fn record_purchase(&self, budget_id: BudgetId, purchase: NewPurchase) -> Result<PurchaseId, TallyError>;

    /// Persist many purchases in one transaction, training on each categorized one
    fn record_purchases(
        &self,
        budget_id: BudgetId,
        purchases: Vec<NewPurchase>,
    ) -> Result<Vec<PurchaseId>, TallyError>;

    /// Assign a category to a stored purchase and train on it
    fn categorize_purchase(&self, purchase_id: PurchaseId, category_id: CategoryId) -> Result<(), TallyError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Term statistics of one category, ordered by gram length then term
    fn term_frequencies(&self, category_id: CategoryId) -> Result<Vec<CategoryTermFrequency>, TallyError>;

    /// The registered gram lengths and their weights
    fn term_types(&self) -> Result<Vec<TermType>, TallyError>;
}

impl From<crate::database::DatabaseError> for TallyError {
    fn from(e: crate::database::DatabaseError) -> Self {
        TallyError::Database(e.to_string())
    }
}
