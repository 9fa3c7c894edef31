//! Tally Core - purchase auto-categorization for budgets
//!
//! Learns, per budget, which words and short phrases of a purchase description
//! tend to belong to which category, and suggests a category for new descriptions.
//! Training is incremental: every categorized purchase bumps a set of n-gram
//! counters in SQLite; suggestion scores the counters a description hits.

pub mod config;
pub mod database;
pub mod interface;
pub mod models;
mod store;
pub mod suggest;
pub mod term_types;
pub mod tokenize;
mod trainer;

pub use config::StoreConfig;
pub use interface::*;
pub use store::CategorizerStore;
pub use term_types::TermTypeRegistry;
pub use tokenize::{ngrams, tokenize};
