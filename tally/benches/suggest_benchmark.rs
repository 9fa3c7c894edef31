use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use tally::{AnalyseRequest, BudgetId, CategorizerApi, CategorizerStore, NewPurchase};

const MERCHANTS: &[(&str, &[&str])] = &[
    ("Groceries", &["Woolworths Metro", "Coles Supermarket", "Aldi Stores", "Harris Farm Markets"]),
    ("Transport", &["Opal Travel Topup", "Uber Trip", "Shell Coles Express", "Secure Parking"]),
    ("Dining", &["Guzman y Gomez", "Sushi Train", "Local Cafe Espresso", "Uber Eats Order"]),
    ("Utilities", &["Origin Energy Bill", "Sydney Water", "Telstra Mobile Plan"]),
];

fn setup_store(purchases: usize) -> (CategorizerStore, BudgetId) {
    let store = CategorizerStore::new_in_memory().expect("Failed to create store");
    let budget = store.create_budget("Bench").unwrap();
    let categories: Vec<_> = MERCHANTS
        .iter()
        .map(|(name, merchants)| (store.create_category(budget, name).unwrap(), *merchants))
        .collect();

    let mut rng = rand::thread_rng();
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let batch: Vec<NewPurchase> = (0..purchases)
        .map(|i| {
            let (category_id, merchants) = categories[rng.gen_range(0..categories.len())];
            let merchant = merchants[rng.gen_range(0..merchants.len())];
            NewPurchase::new(date, 1_000, format!("{} Store {}", merchant, i % 50), Some(category_id))
        })
        .collect();
    store.record_purchases(budget, batch).unwrap();
    (store, budget)
}

fn bench_suggest(c: &mut Criterion) {
    let (store, budget) = setup_store(5_000);

    let queries = vec![
        ("single_word", "woolworths"),
        ("merchant", "COLES SUPERMARKET #4411"),
        ("shared_words", "Uber Eats Trip"),
        ("long_description", "Card purchase Harris Farm Markets Bondi Junction NSW AU"),
        ("unknown", "Completely unrelated text"),
    ];

    let mut group = c.benchmark_group("suggest");
    for (name, query) in queries {
        group.bench_function(name, |b| b.iter(|| store.suggest(budget, query).unwrap()));
    }
    group.finish();
}

fn bench_analyse(c: &mut Criterion) {
    let (store, budget) = setup_store(5_000);
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("analyse");
    group.sample_size(20);

    for size in [10usize, 100, 1_000] {
        let items: Vec<AnalyseRequest> = (0..size as u64)
            .map(|index| AnalyseRequest {
                index,
                description: format!("{} #{}", MERCHANTS[index as usize % MERCHANTS.len()].1[0], index),
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| rt.block_on(async { store.analyse(budget, items.clone()).await.unwrap() }));
        });
    }
    group.finish();
}

fn bench_reprocess(c: &mut Criterion) {
    let (store, budget) = setup_store(2_000);

    let mut group = c.benchmark_group("reprocess");
    group.sample_size(10);
    group.bench_function("2k_purchases", |b| b.iter(|| store.reprocess(budget).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_suggest, bench_analyse, bench_reprocess);
criterion_main!(benches);
