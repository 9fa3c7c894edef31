//! Generate a demo database of categorized purchases.
//!
//! Creates a SQLite database through the store itself, so the schema, seeded
//! term types and trained frequencies match what the library produces.
//!
//! Usage:
//!     cargo run --release --bin generate-demo-db -- [--purchases N] [output_path]
//!
//! Default output: target/DemoBudget.sqlite in the workspace root

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;
use log::info;
use rand::Rng;
use std::path::PathBuf;
use tally::{CategorizerApi, CategorizerStore, NewPurchase, StoreConfig};

/// Categories and the merchants that typically land in them
const CATALOGUE: &[(&str, &[&str])] = &[
    (
        "Groceries",
        &["Woolworths Metro", "Coles Supermarket", "Aldi Stores", "Harris Farm Markets", "IGA Local Grocer"],
    ),
    (
        "Transport",
        &["Opal Travel Topup", "Uber Trip", "Shell Coles Express", "BP Connect", "Secure Parking"],
    ),
    (
        "Dining",
        &["Guzman y Gomez", "Sushi Train", "Local Cafe Espresso", "Uber Eats Order", "Pizza Hut Delivery"],
    ),
    (
        "Utilities",
        &["Origin Energy Bill", "Sydney Water", "Telstra Mobile Plan", "AGL Gas Account"],
    ),
    (
        "Entertainment",
        &["Netflix Subscription", "Spotify Premium", "Event Cinemas", "Steam Games Purchase"],
    ),
];

/// Suffixes that bank feeds append to merchant names
const NOISE: &[&str] = &["", " #4411", " Sydney NSW", " Card 0042", " Pty Ltd", " AU"];

#[derive(Parser, Debug)]
#[command(about = "Generate a demo budget database with trained categories")]
struct Args {
    /// Output database path
    output: Option<PathBuf>,

    /// Number of purchases to generate
    #[arg(long, default_value_t = 2_000)]
    purchases: usize,

    /// Share of purchases left uncategorized
    #[arg(long, default_value_t = 0.1)]
    uncategorized: f64,
}

/// Next to the workspace build artifacts, which are already ignored
fn default_output_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("DemoBudget.sqlite")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let output_path = args.output.unwrap_or_else(default_output_path);

    if output_path.exists() {
        std::fs::remove_file(&output_path)
            .with_context(|| format!("failed to remove {}", output_path.display()))?;
    }
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create output directory")?;
    }

    info!("generating demo database at {}", output_path.display());
    let store = CategorizerStore::open(&output_path, &StoreConfig::default())?;

    let budget = store.create_budget("Household")?;
    let mut categories = Vec::with_capacity(CATALOGUE.len());
    for (name, merchants) in CATALOGUE {
        categories.push((store.create_category(budget, name)?, *merchants));
    }

    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let uncategorized = args.uncategorized.clamp(0.0, 1.0);

    let purchases: Vec<NewPurchase> = (0..args.purchases)
        .map(|_| {
            let (category_id, merchants) = categories[rng.gen_range(0..categories.len())];
            let merchant = merchants[rng.gen_range(0..merchants.len())];
            let description = format!("{}{}", merchant, NOISE[rng.gen_range(0..NOISE.len())]);
            let date = start + Duration::days(rng.gen_range(0..365));
            let category = if rng.gen_bool(uncategorized) { None } else { Some(category_id) };
            NewPurchase::new(date, rng.gen_range(300..25_000), description, category)
        })
        .collect();

    let ids = store.record_purchases(budget, purchases)?;
    let replayed = store.reprocess(budget)?;

    println!();
    println!("Database created: {}", output_path.display());
    println!("  Purchases: {}", ids.len());
    println!("  Categorized: {}", replayed);
    for (category_id, _) in &categories {
        println!(
            "  Category {}: {} terms",
            category_id,
            store.term_frequencies(*category_id)?.len()
        );
    }
    Ok(())
}
