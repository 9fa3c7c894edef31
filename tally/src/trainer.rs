//! Incremental training of the term-frequency index
//!
//! Both entry points run against a connection that the caller has already placed
//! inside a write transaction, so a purchase is counted completely or not at all.

use crate::database::{Database, DatabaseResult};
use crate::interface::{BudgetId, CategoryId};
use crate::term_types::TermTypeRegistry;
use log::debug;
use rusqlite::Connection;

/// Count every registered n-gram of `description` against `category_id`.
///
/// Not idempotent: each call adds one observation per distinct term.
/// Returns the number of counters touched (0 for an empty description or absent category).
pub(crate) fn train(
    conn: &Connection,
    registry: &TermTypeRegistry,
    description: &str,
    category_id: Option<CategoryId>,
) -> DatabaseResult<usize> {
    let Some(category_id) = category_id else {
        return Ok(0);
    };
    if description.is_empty() {
        return Ok(0);
    }

    let mut touched = 0;
    for (gram_length, terms) in registry.terms_by_length(description) {
        for term in &terms {
            Database::upsert_term_frequency(conn, category_id, term, gram_length)?;
            touched += 1;
        }
    }

    debug!("trained category {} on {} terms", category_id, touched);
    Ok(touched)
}

/// Drop the budget's term statistics and replay every categorized purchase.
/// Returns the number of purchases replayed; uncategorized or undescribed ones are skipped.
pub(crate) fn rebuild_budget(
    conn: &Connection,
    registry: &TermTypeRegistry,
    budget_id: BudgetId,
) -> DatabaseResult<u64> {
    let cleared = Database::delete_budget_term_frequencies(conn, budget_id)?;

    let purchases = Database::fetch_budget_purchases(conn, budget_id)?;
    let mut replayed = 0u64;
    for purchase in &purchases {
        if let Some((description, category_id)) = purchase.training_pair() {
            train(conn, registry, description, Some(category_id))?;
            replayed += 1;
        }
    }

    debug!(
        "budget {}: cleared {} counters, replayed {}/{} purchases",
        budget_id,
        cleared,
        replayed,
        purchases.len()
    );
    Ok(replayed)
}
