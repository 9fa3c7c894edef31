//! CategorizerStore - the object the host application holds
//!
//! Owns the database pool and the term-type registry, and implements
//! `CategorizerApi` on top of the trainer and suggester.
//!
//! Concurrency Model:
//! - Writes (training, purchase recording, reprocessing) each run in one IMMEDIATE
//!   SQLite transaction, so a rebuild never interleaves with a concurrent train.
//! - Suggestions are plain reads; WAL mode lets them proceed during writes.
//! - Batch suggestion runs on a blocking thread and fans out with rayon.

use crate::config::StoreConfig;
use crate::database::Database;
use crate::interface::{
    AnalyseRequest, AnalyseResult, BudgetId, CategorizerApi, CategoryId, CategoryTermFrequency,
    NewPurchase, PurchaseId, TallyError, TermType,
};
use crate::suggest;
use crate::term_types::TermTypeRegistry;
use crate::trainer;
use log::{info, warn};
use once_cell::sync::{Lazy, OnceCell};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Fallback Tokio runtime for batch suggestion polled outside any runtime context.
/// Shared across all stores and never dropped.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create fallback tokio runtime")
});

/// Thread-safe categorizer over SQLite
pub struct CategorizerStore {
    db: Arc<Database>,
    /// Loaded from `term_types` on first use, then fixed for the store's lifetime
    registry: OnceCell<TermTypeRegistry>,
}

impl CategorizerStore {
    /// Open or create a store backed by the database at `path`
    pub fn open<P: AsRef<Path>>(path: P, config: &StoreConfig) -> Result<Self, TallyError> {
        let db = Database::open(path, config)?;
        Ok(Self::with_database(db))
    }

    /// Create a store with an in-memory database
    pub fn new_in_memory() -> Result<Self, TallyError> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db))
    }

    fn with_database(db: Database) -> Self {
        Self {
            db: Arc::new(db),
            registry: OnceCell::new(),
        }
    }

    /// Get a tokio runtime handle - uses current runtime if available, otherwise global fallback
    fn runtime_handle(&self) -> tokio::runtime::Handle {
        tokio::runtime::Handle::try_current()
            .unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
    }

    /// The registry, fetched whole on first call. A failed fetch leaves it unset.
    fn registry(&self) -> Result<&TermTypeRegistry, TallyError> {
        self.registry.get_or_try_init(|| {
            let registry = TermTypeRegistry::new(self.db.fetch_term_types()?);
            if registry.is_empty() {
                warn!("term_types is empty: training and suggestion will match nothing");
            } else {
                info!("loaded {} term types", registry.all().len());
            }
            Ok::<_, TallyError>(registry)
        })
    }

    fn check_budget(conn: &Connection, budget_id: BudgetId) -> Result<(), TallyError> {
        if Database::budget_exists(conn, budget_id)? {
            Ok(())
        } else {
            Err(TallyError::NotFound(format!("budget {}", budget_id)))
        }
    }

    /// A purchase may only be filed under a category of its own budget
    fn check_category_in_budget(
        conn: &Connection,
        budget_id: BudgetId,
        category_id: CategoryId,
    ) -> Result<(), TallyError> {
        match Database::category_budget(conn, category_id)? {
            None => Err(TallyError::NotFound(format!("category {}", category_id))),
            Some(owner) if owner != budget_id => Err(TallyError::InvalidInput(format!(
                "category {} belongs to budget {}, not {}",
                category_id, owner, budget_id
            ))),
            Some(_) => Ok(()),
        }
    }

    /// Insert one purchase and train on it, inside the caller's transaction
    fn record_in(
        conn: &Connection,
        registry: &TermTypeRegistry,
        budget_id: BudgetId,
        purchase: &NewPurchase,
    ) -> Result<PurchaseId, TallyError> {
        if let Some(category_id) = purchase.category_id {
            Self::check_category_in_budget(conn, budget_id, category_id)?;
        }
        let id = Database::insert_purchase(conn, budget_id, purchase)?;
        let description = purchase.description.as_deref().unwrap_or("");
        trainer::train(conn, registry, description, purchase.category_id)?;
        Ok(id)
    }

    /// Suggest for every request line in parallel, restoring input order
    fn analyse_sync(
        db: &Database,
        registry: &TermTypeRegistry,
        budget_id: BudgetId,
        items: Vec<AnalyseRequest>,
    ) -> Result<Vec<AnalyseResult>, TallyError> {
        use rayon::prelude::*;
        let mut indexed: Vec<(usize, AnalyseResult)> = items
            .into_par_iter()
            .enumerate()
            .map(|(position, item)| -> Result<(usize, AnalyseResult), TallyError> {
                let category = suggest::suggest(db, registry, budget_id, &item.description)?;
                Ok((position, AnalyseResult { index: item.index, category }))
            })
            .collect::<Result<Vec<_>, TallyError>>()?;

        indexed.sort_unstable_by_key(|(position, _)| *position);
        Ok(indexed.into_iter().map(|(_, result)| result).collect())
    }
}

#[async_trait::async_trait]
impl CategorizerApi for CategorizerStore {
    // ─────────────────────────────────────────────────────────────────────────────
    // Classifier
    // ─────────────────────────────────────────────────────────────────────────────

    fn train(&self, description: &str, category_id: Option<CategoryId>) -> Result<(), TallyError> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        if description.is_empty() {
            return Ok(());
        }

        let registry = self.registry()?;
        self.db.write_transaction(|conn| {
            if Database::category_budget(conn, category_id)?.is_none() {
                return Err(TallyError::NotFound(format!("category {}", category_id)));
            }
            trainer::train(conn, registry, description, Some(category_id))?;
            Ok(())
        })
    }

    fn suggest(&self, budget_id: BudgetId, description: &str) -> Result<Option<CategoryId>, TallyError> {
        let registry = self.registry()?;
        Ok(suggest::suggest(&self.db, registry, budget_id, description)?)
    }

    async fn analyse(
        &self,
        budget_id: BudgetId,
        items: Vec<AnalyseRequest>,
    ) -> Result<Vec<AnalyseResult>, TallyError> {
        if !self.db.contains_budget(budget_id)? {
            return Err(TallyError::NotFound(format!("budget {}", budget_id)));
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let registry = self.registry()?.clone();
        let db = Arc::clone(&self.db);

        // runtime.spawn_blocking() rather than tokio::task::spawn_blocking():
        // the future may be polled outside a tokio context
        let handle = self
            .runtime_handle()
            .spawn_blocking(move || Self::analyse_sync(&db, &registry, budget_id, items));

        match handle.await {
            Ok(result) => result,
            // JoinError means the task panicked or was aborted
            Err(_join_error) => Err(TallyError::Cancelled),
        }
    }

    fn reprocess(&self, budget_id: BudgetId) -> Result<u64, TallyError> {
        let registry = self.registry()?;
        let replayed = self.db.write_transaction(|conn| {
            Self::check_budget(conn, budget_id)?;
            Ok::<_, TallyError>(trainer::rebuild_budget(conn, registry, budget_id)?)
        })?;

        info!("reprocessed {} purchases for budget {}", replayed, budget_id);
        Ok(replayed)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Budgets, categories and purchases
    // ─────────────────────────────────────────────────────────────────────────────

    fn create_budget(&self, name: &str) -> Result<BudgetId, TallyError> {
        Ok(self.db.create_budget(name)?)
    }

    fn delete_budget(&self, budget_id: BudgetId) -> Result<(), TallyError> {
        if self.db.delete_budget(budget_id)? {
            Ok(())
        } else {
            Err(TallyError::NotFound(format!("budget {}", budget_id)))
        }
    }

    fn create_category(&self, budget_id: BudgetId, name: &str) -> Result<CategoryId, TallyError> {
        if !self.db.contains_budget(budget_id)? {
            return Err(TallyError::NotFound(format!("budget {}", budget_id)));
        }
        Ok(self.db.create_category(budget_id, name)?)
    }

    fn delete_category(&self, category_id: CategoryId) -> Result<(), TallyError> {
        if self.db.delete_category(category_id)? {
            Ok(())
        } else {
            Err(TallyError::NotFound(format!("category {}", category_id)))
        }
    }

    fn record_purchase(&self, budget_id: BudgetId, purchase: NewPurchase) -> Result<PurchaseId, TallyError> {
        let registry = self.registry()?;
        self.db.write_transaction(|conn| {
            Self::check_budget(conn, budget_id)?;
            Self::record_in(conn, registry, budget_id, &purchase)
        })
    }

    fn record_purchases(
        &self,
        budget_id: BudgetId,
        purchases: Vec<NewPurchase>,
    ) -> Result<Vec<PurchaseId>, TallyError> {
        let registry = self.registry()?;
        self.db.write_transaction(|conn| {
            Self::check_budget(conn, budget_id)?;
            purchases
                .iter()
                .map(|purchase| Self::record_in(conn, registry, budget_id, purchase))
                .collect()
        })
    }

    fn categorize_purchase(&self, purchase_id: PurchaseId, category_id: CategoryId) -> Result<(), TallyError> {
        let registry = self.registry()?;
        self.db.write_transaction(|conn| {
            let purchase = Database::fetch_purchase(conn, purchase_id)?
                .ok_or_else(|| TallyError::NotFound(format!("purchase {}", purchase_id)))?;
            Self::check_category_in_budget(conn, purchase.budget_id, category_id)?;
            Database::set_purchase_category(conn, purchase_id, Some(category_id))?;

            let description = purchase.description.as_deref().unwrap_or("");
            trainer::train(conn, registry, description, Some(category_id))?;
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────────

    fn term_frequencies(&self, category_id: CategoryId) -> Result<Vec<CategoryTermFrequency>, TallyError> {
        Ok(self.db.fetch_term_frequencies(category_id)?)
    }

    fn term_types(&self) -> Result<Vec<TermType>, TallyError> {
        Ok(self.registry()?.all().to_vec())
    }
}
