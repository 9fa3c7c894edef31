//! Category suggestion
//!
//! A description is broken into the same n-grams the trainer counts. Every term
//! with history votes for the categories it was seen under:
//!
//! ```text
//! term_score   = 1 / k²            k = categories sharing the term
//! contribution = weight * term_score   (kept only when > NOISE_FLOOR)
//! ```
//!
//! Raw frequencies are not part of the vote. A category seen once with a phrase
//! scores the same as one seen a hundred times; only ambiguity across categories
//! and phrase length matter.

use crate::database::{Database, DatabaseResult};
use crate::interface::{BudgetId, CategoryId};
use crate::models::MatchedTermRow;
use crate::term_types::TermTypeRegistry;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Below this share of query terms with any history, no suggestion is made.
pub const MIN_MATCH_RATIO: f64 = 0.3;

/// Contributions at or below this do not vote
pub const NOISE_FLOOR: f64 = 0.1;

/// History of one term under one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermMatch {
    pub category_id: CategoryId,
    pub frequency: u64,
    pub weight: f64,
}

/// Term → every category it was seen under
pub type TermMatches = BTreeMap<String, Vec<TermMatch>>;

/// Group matched rows by term, attaching each row's weight from the registry
pub fn group_matches(rows: Vec<MatchedTermRow>, registry: &TermTypeRegistry) -> TermMatches {
    let mut grouped = TermMatches::new();
    for row in rows {
        let Some(weight) = registry.weight(row.gram_length) else {
            warn!(
                "term {:?} stored with unregistered gram length {}",
                row.term, row.gram_length
            );
            continue;
        };
        grouped.entry(row.term).or_default().push(TermMatch {
            category_id: row.category_id,
            frequency: row.frequency,
            weight,
        });
    }
    grouped
}

/// Pick a category from grouped matches.
///
/// `total_terms` is the size of the query's term set. Ties go to the lowest
/// category id.
pub fn score_matches(total_terms: usize, matches: &TermMatches) -> Option<CategoryId> {
    if total_terms == 0 {
        return None;
    }

    let matched_terms = matches.values().filter(|entries| !entries.is_empty()).count();
    let ratio = matched_terms as f64 / total_terms as f64;
    if ratio < MIN_MATCH_RATIO {
        debug!("match ratio {:.2} below {}", ratio, MIN_MATCH_RATIO);
        return None;
    }

    let mut scores: BTreeMap<CategoryId, f64> = BTreeMap::new();
    for entries in matches.values() {
        if entries.is_empty() {
            continue;
        }
        let k = entries.len() as f64;
        let term_score = 1.0 / (k * k);

        for entry in entries {
            let contribution = entry.weight * term_score;
            if contribution > NOISE_FLOOR {
                *scores.entry(entry.category_id).or_insert(0.0) += contribution;
            }
        }
    }

    // Ascending id order plus strict `>` keeps the lowest id on ties
    let mut best: Option<(CategoryId, f64)> = None;
    for (category_id, score) in scores {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((category_id, score)),
        }
    }

    if let Some((category_id, score)) = best {
        debug!(
            "suggesting category {} (score {:.3}, {}/{} terms matched)",
            category_id, score, matched_terms, total_terms
        );
    }
    best.map(|(category_id, _)| category_id)
}

/// Suggest a category for `description` among the budget's categories
pub(crate) fn suggest(
    db: &Database,
    registry: &TermTypeRegistry,
    budget_id: BudgetId,
    description: &str,
) -> DatabaseResult<Option<CategoryId>> {
    let terms = registry.terms(description);
    if terms.is_empty() {
        return Ok(None);
    }

    let term_refs: Vec<&str> = terms.iter().map(String::as_str).collect();
    let rows = db.fetch_matching_terms(budget_id, &term_refs)?;
    if rows.is_empty() {
        return Ok(None);
    }

    let matches = group_matches(rows, registry);
    Ok(score_matches(terms.len(), &matches))
}
