//! Term-type registry
//!
//! Which gram lengths are indexed and how much each one counts. The table is
//! seeded at deployment and never written at runtime, so the store loads it once
//! and hands it by reference to the trainer and suggester.

use crate::interface::TermType;
use crate::tokenize::{ngrams, tokenize};
use std::collections::BTreeSet;

/// Seed rows for a fresh database: longer phrases are stronger evidence
pub const DEFAULT_TERM_TYPES: [TermType; 3] = [
    TermType { gram_length: 1, weight: 1.0 },
    TermType { gram_length: 2, weight: 3.0 },
    TermType { gram_length: 3, weight: 5.0 },
];

#[derive(Debug, Clone, PartialEq)]
pub struct TermTypeRegistry {
    /// Sorted by gram length, one entry per length
    types: Vec<TermType>,
}

impl TermTypeRegistry {
    pub fn new(mut types: Vec<TermType>) -> Self {
        types.sort_by_key(|t| t.gram_length);
        types.dedup_by_key(|t| t.gram_length);
        Self { types }
    }

    pub fn all(&self) -> &[TermType] {
        &self.types
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn weight(&self, gram_length: usize) -> Option<f64> {
        self.types
            .binary_search_by_key(&gram_length, |t| t.gram_length)
            .ok()
            .map(|i| self.types[i].weight)
    }

    /// N-gram sets of `text` for every registered gram length
    pub fn terms_by_length(&self, text: &str) -> Vec<(usize, BTreeSet<String>)> {
        let tokens = tokenize(text);
        self.types
            .iter()
            .map(|t| (t.gram_length, ngrams(&tokens, t.gram_length)))
            .collect()
    }

    /// Union of all registered n-gram sets of `text`.
    /// Phrases of different lengths never collide: an n-gram holds n-1 spaces.
    pub fn terms(&self, text: &str) -> BTreeSet<String> {
        self.terms_by_length(text)
            .into_iter()
            .flat_map(|(_, terms)| terms)
            .collect()
    }
}

impl Default for TermTypeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TERM_TYPES.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let registry = TermTypeRegistry::default();
        assert_eq!(registry.weight(1), Some(1.0));
        assert_eq!(registry.weight(2), Some(3.0));
        assert_eq!(registry.weight(3), Some(5.0));
        assert_eq!(registry.weight(4), None);
    }

    #[test]
    fn test_new_sorts_and_dedups() {
        let registry = TermTypeRegistry::new(vec![
            TermType { gram_length: 3, weight: 5.0 },
            TermType { gram_length: 1, weight: 1.0 },
            TermType { gram_length: 1, weight: 9.0 },
        ]);
        let lengths: Vec<usize> = registry.all().iter().map(|t| t.gram_length).collect();
        assert_eq!(lengths, vec![1, 3]);
        assert_eq!(registry.weight(1), Some(1.0));
    }

    #[test]
    fn test_terms_union_across_lengths() {
        let registry = TermTypeRegistry::default();
        let terms = registry.terms("Local Fresh Market");
        let expected: BTreeSet<String> = [
            "local",
            "fresh",
            "market",
            "local fresh",
            "fresh market",
            "local fresh market",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(terms, expected);
    }

    #[test]
    fn test_terms_only_registered_lengths() {
        let registry = TermTypeRegistry::new(vec![TermType { gram_length: 2, weight: 3.0 }]);
        let terms = registry.terms("shell coles express");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains("shell coles"));
        assert!(terms.contains("coles express"));
    }

    #[test]
    fn test_empty_registry_yields_no_terms() {
        let registry = TermTypeRegistry::new(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.terms("anything at all").is_empty());
    }
}
