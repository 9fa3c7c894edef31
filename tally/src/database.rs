//! SQLite database layer for budgets, purchases and the term-frequency index
//!
//! Schema: `budgets` own `categories` and `purchases`; every category owns its
//! `category_term_frequencies` rows (ON DELETE CASCADE). `term_types` is reference
//! data seeded on first open.
//! Uses r2d2 connection pooling; WAL mode lets suggestion reads run alongside writers.

use crate::config::StoreConfig;
use crate::interface::{
    BudgetId, CategoryId, CategoryTermFrequency, NewPurchase, PurchaseId, TermType,
};
use crate::models::{MatchedTermRow, StoredPurchase};
use crate::term_types::DEFAULT_TERM_TYPES;
use chrono::NaiveDate;
use log::info;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Bound on bound parameters per suggestion lookup
const MAX_TERMS_PER_QUERY: usize = 500;

fn parse_db_date(column: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Thread-safe database wrapper using connection pooling
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open or create a database at the given path with connection pooling
    pub fn open<P: AsRef<Path>>(path: P, config: &StoreConfig) -> DatabaseResult<Self> {
        let busy_timeout = config.busy_timeout();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            // Before the journal switch: pooled connections are opened concurrently
            conn.busy_timeout(busy_timeout)?;
            conn.execute_batch(
                "
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
                PRAGMA foreign_keys=ON;
            ",
            )?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .build(manager)?;

        let db = Self { pool };
        db.setup_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (tests, benchmarks)
    pub fn open_in_memory() -> DatabaseResult<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys=ON;")?;
            Ok(())
        });

        // In-memory needs a single connection that is never recycled to keep its state
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;

        let db = Self { pool };
        db.setup_schema()?;
        Ok(db)
    }

    /// Get a connection from the pool
    fn get_conn(&self) -> DatabaseResult<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    fn setup_schema(&self) -> DatabaseResult<()> {
        let conn = self.get_conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                budgetId INTEGER NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                UNIQUE (budgetId, name)
            );

            CREATE TABLE IF NOT EXISTS purchases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                budgetId INTEGER NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
                purchaseDate TEXT NOT NULL,
                amountCents INTEGER NOT NULL,
                description TEXT,
                categoryId INTEGER REFERENCES categories(id) ON DELETE SET NULL
            );

            CREATE TABLE IF NOT EXISTS term_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                gramLength INTEGER NOT NULL UNIQUE,
                weight REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS category_term_frequencies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                categoryId INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                term TEXT NOT NULL,
                gramLength INTEGER NOT NULL REFERENCES term_types(gramLength) ON DELETE RESTRICT,
                frequency INTEGER NOT NULL DEFAULT 1,
                UNIQUE (categoryId, term, gramLength)
            );

            CREATE INDEX IF NOT EXISTS idx_categories_budget ON categories(budgetId);
            CREATE INDEX IF NOT EXISTS idx_purchases_budget ON purchases(budgetId, purchaseDate);
            CREATE INDEX IF NOT EXISTS idx_purchases_category ON purchases(categoryId);
            CREATE INDEX IF NOT EXISTS idx_frequencies_term ON category_term_frequencies(term);
            CREATE INDEX IF NOT EXISTS idx_frequencies_category_gram ON category_term_frequencies(categoryId, gramLength);
        "#,
        )?;

        let seeded = Self::seed_term_types(&conn)?;
        if seeded > 0 {
            info!("seeded {} term types", seeded);
        }

        Ok(())
    }

    /// Insert the default term types into an empty `term_types` table.
    /// Returns the number of rows inserted.
    fn seed_term_types(conn: &Connection) -> DatabaseResult<usize> {
        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM term_types", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = conn.unchecked_transaction()?;
        let mut inserted = 0;
        for term_type in DEFAULT_TERM_TYPES {
            inserted += tx.execute(
                "INSERT OR IGNORE INTO term_types (gramLength, weight) VALUES (?1, ?2)",
                params![term_type.gram_length as i64, term_type.weight],
            )?;
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Run `f` inside an IMMEDIATE transaction.
    /// SQLite's write lock is held from the first statement, so concurrent writers
    /// queue on the busy timeout instead of failing mid-transaction.
    /// Rolls back when `f` fails.
    pub(crate) fn write_transaction<T, E>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DatabaseError>,
    {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(DatabaseError::from)?;
        let value = f(&*tx)?;
        tx.commit().map_err(DatabaseError::from)?;
        Ok(value)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Budgets and categories
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn create_budget(&self, name: &str) -> DatabaseResult<BudgetId> {
        let conn = self.get_conn()?;
        conn.execute("INSERT INTO budgets (name) VALUES (?1)", [name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete a budget (CASCADE handles categories, purchases and frequencies).
    /// Returns false if no such budget existed.
    pub fn delete_budget(&self, id: BudgetId) -> DatabaseResult<bool> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM budgets WHERE id = ?1", [id])? > 0)
    }

    pub fn budget_exists(conn: &Connection, id: BudgetId) -> DatabaseResult<bool> {
        let found = conn
            .query_row("SELECT 1 FROM budgets WHERE id = ?1", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    pub fn contains_budget(&self, id: BudgetId) -> DatabaseResult<bool> {
        let conn = self.get_conn()?;
        Self::budget_exists(&conn, id)
    }

    pub fn create_category(&self, budget_id: BudgetId, name: &str) -> DatabaseResult<CategoryId> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO categories (budgetId, name) VALUES (?1, ?2)",
            params![budget_id, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete a category. CASCADE removes its frequencies; its purchases keep a NULL category.
    /// Returns false if no such category existed.
    pub fn delete_category(&self, id: CategoryId) -> DatabaseResult<bool> {
        let conn = self.get_conn()?;
        Ok(conn.execute("DELETE FROM categories WHERE id = ?1", [id])? > 0)
    }

    /// Owning budget of a category, if the category exists
    pub fn category_budget(conn: &Connection, category_id: CategoryId) -> DatabaseResult<Option<BudgetId>> {
        Ok(conn
            .query_row(
                "SELECT budgetId FROM categories WHERE id = ?1",
                [category_id],
                |row| row.get(0),
            )
            .optional()?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Purchases
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn insert_purchase(
        conn: &Connection,
        budget_id: BudgetId,
        purchase: &NewPurchase,
    ) -> DatabaseResult<PurchaseId> {
        conn.execute(
            r#"INSERT INTO purchases (budgetId, purchaseDate, amountCents, description, categoryId)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            params![
                budget_id,
                purchase.purchase_date.format(DATE_FORMAT).to_string(),
                purchase.amount_cents,
                purchase.description,
                purchase.category_id,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn fetch_purchase(conn: &Connection, id: PurchaseId) -> DatabaseResult<Option<StoredPurchase>> {
        Ok(conn
            .query_row(
                "SELECT id, budgetId, purchaseDate, amountCents, description, categoryId FROM purchases WHERE id = ?1",
                [id],
                Self::row_to_purchase,
            )
            .optional()?)
    }

    pub fn set_purchase_category(
        conn: &Connection,
        id: PurchaseId,
        category_id: Option<CategoryId>,
    ) -> DatabaseResult<()> {
        conn.execute(
            "UPDATE purchases SET categoryId = ?1 WHERE id = ?2",
            params![category_id, id],
        )?;
        Ok(())
    }

    /// All purchases of a budget, newest first
    pub fn fetch_budget_purchases(conn: &Connection, budget_id: BudgetId) -> DatabaseResult<Vec<StoredPurchase>> {
        let mut stmt = conn.prepare(
            r#"SELECT id, budgetId, purchaseDate, amountCents, description, categoryId
               FROM purchases WHERE budgetId = ?1
               ORDER BY purchaseDate DESC, id DESC"#,
        )?;
        let purchases = stmt
            .query_map([budget_id], Self::row_to_purchase)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(purchases)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Term-frequency index
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn fetch_term_types(&self) -> DatabaseResult<Vec<TermType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT gramLength, weight FROM term_types ORDER BY gramLength")?;
        let types = stmt
            .query_map([], |row| {
                let gram_length: i64 = row.get(0)?;
                Ok(TermType {
                    gram_length: gram_length as usize,
                    weight: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(types)
    }

    /// Insert the counter at 1, or add 1 to it. One statement, so a concurrent
    /// first observation of the same key becomes an increment rather than a conflict.
    pub fn upsert_term_frequency(
        conn: &Connection,
        category_id: CategoryId,
        term: &str,
        gram_length: usize,
    ) -> DatabaseResult<()> {
        let mut stmt = conn.prepare_cached(
            r#"INSERT INTO category_term_frequencies (categoryId, term, gramLength, frequency)
               VALUES (?1, ?2, ?3, 1)
               ON CONFLICT (categoryId, term, gramLength)
               DO UPDATE SET frequency = frequency + 1"#,
        )?;
        stmt.execute(params![category_id, term, gram_length as i64])?;
        Ok(())
    }

    /// Delete every frequency row of the budget's categories. Returns rows deleted.
    pub fn delete_budget_term_frequencies(conn: &Connection, budget_id: BudgetId) -> DatabaseResult<usize> {
        Ok(conn.execute(
            r#"DELETE FROM category_term_frequencies
               WHERE categoryId IN (SELECT id FROM categories WHERE budgetId = ?1)"#,
            [budget_id],
        )?)
    }

    /// Frequency rows for any of `terms` whose category belongs to the budget
    pub fn fetch_matching_terms(&self, budget_id: BudgetId, terms: &[&str]) -> DatabaseResult<Vec<MatchedTermRow>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let mut rows = Vec::new();

        for chunk in terms.chunks(MAX_TERMS_PER_QUERY) {
            let placeholders = (0..chunk.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(",");
            let sql = format!(
                r#"SELECT f.term, f.categoryId, f.frequency, f.gramLength
                   FROM category_term_frequencies f
                   JOIN categories c ON c.id = f.categoryId
                   WHERE c.budgetId = ?1 AND f.term IN ({})
                   ORDER BY f.term, f.categoryId"#,
                placeholders
            );

            let mut stmt = conn.prepare(&sql)?;
            let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(chunk.len() + 1);
            values.push(budget_id.into());
            values.extend(chunk.iter().map(|term| rusqlite::types::Value::Text(term.to_string())));

            let matched = stmt
                .query_map(rusqlite::params_from_iter(values), |row| {
                    let frequency: i64 = row.get(2)?;
                    let gram_length: i64 = row.get(3)?;
                    Ok(MatchedTermRow {
                        term: row.get(0)?,
                        category_id: row.get(1)?,
                        frequency: frequency as u64,
                        gram_length: gram_length as usize,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows.extend(matched);
        }

        Ok(rows)
    }

    /// Frequency rows of one category, ordered by gram length then term
    pub fn fetch_term_frequencies(&self, category_id: CategoryId) -> DatabaseResult<Vec<CategoryTermFrequency>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT categoryId, term, gramLength, frequency
               FROM category_term_frequencies WHERE categoryId = ?1
               ORDER BY gramLength, term"#,
        )?;
        let rows = stmt
            .query_map([category_id], |row| {
                let gram_length: i64 = row.get(2)?;
                let frequency: i64 = row.get(3)?;
                Ok(CategoryTermFrequency {
                    category_id: row.get(0)?,
                    term: row.get(1)?,
                    gram_length: gram_length as usize,
                    frequency: frequency as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Number of frequency rows across the budget's categories
    pub fn count_budget_term_frequencies(&self, budget_id: BudgetId) -> DatabaseResult<u64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            r#"SELECT COUNT(*) FROM category_term_frequencies f
               JOIN categories c ON c.id = f.categoryId
               WHERE c.budgetId = ?1"#,
            [budget_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn row_to_purchase(row: &rusqlite::Row) -> rusqlite::Result<StoredPurchase> {
        let purchase_date: String = row.get(2)?;
        Ok(StoredPurchase {
            id: row.get(0)?,
            budget_id: row.get(1)?,
            purchase_date: parse_db_date(2, &purchase_date)?,
            amount_cents: row.get(3)?,
            description: row.get(4)?,
            category_id: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn upsert(db: &Database, category_id: CategoryId, term: &str, gram_length: usize) {
        db.write_transaction(|conn| Database::upsert_term_frequency(conn, category_id, term, gram_length))
            .unwrap();
    }

    #[test]
    fn test_term_types_seeded_once() {
        let db = Database::open_in_memory().unwrap();
        let types = db.fetch_term_types().unwrap();
        assert_eq!(types, DEFAULT_TERM_TYPES.to_vec());

        // Re-running setup must not duplicate the seed
        db.setup_schema().unwrap();
        assert_eq!(db.fetch_term_types().unwrap().len(), 3);
    }

    #[test]
    fn test_upsert_inserts_then_increments() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();

        upsert(&db, groceries, "milk", 1);
        let rows = db.fetch_term_frequencies(groceries).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].frequency, 1);

        upsert(&db, groceries, "milk", 1);
        upsert(&db, groceries, "milk", 1);
        let rows = db.fetch_term_frequencies(groceries).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].frequency, 3);
    }

    #[test]
    fn test_upsert_rejects_unregistered_gram_length() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();

        let result = db.write_transaction(|conn| {
            Database::upsert_term_frequency(conn, groceries, "a b c d", 4)
        });
        assert!(result.is_err());
        assert!(db.fetch_term_frequencies(groceries).unwrap().is_empty());
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();

        let result: DatabaseResult<()> = db.write_transaction(|conn| {
            Database::upsert_term_frequency(conn, groceries, "milk", 1)?;
            Database::upsert_term_frequency(conn, groceries, "bread", 9)
        });
        assert!(result.is_err());
        assert!(db.fetch_term_frequencies(groceries).unwrap().is_empty());
    }

    #[test]
    fn test_delete_category_cascades_frequencies() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();
        let fuel = db.create_category(budget, "Fuel").unwrap();

        upsert(&db, groceries, "milk", 1);
        upsert(&db, fuel, "shell", 1);

        assert!(db.delete_category(groceries).unwrap());
        assert!(db.fetch_term_frequencies(groceries).unwrap().is_empty());
        assert_eq!(db.fetch_term_frequencies(fuel).unwrap().len(), 1);
        assert!(!db.delete_category(groceries).unwrap());
    }

    #[test]
    fn test_delete_category_uncategorizes_purchases() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();

        let id = db
            .write_transaction(|conn| {
                Database::insert_purchase(conn, budget, &NewPurchase::new(date(1), 450, "Coles", Some(groceries)))
            })
            .unwrap();

        db.delete_category(groceries).unwrap();

        let conn = db.get_conn().unwrap();
        let purchase = Database::fetch_purchase(&conn, id).unwrap().unwrap();
        assert_eq!(purchase.category_id, None);
        assert_eq!(purchase.description.as_deref(), Some("Coles"));
    }

    #[test]
    fn test_delete_budget_cascades_everything() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Household").unwrap();
        let groceries = db.create_category(budget, "Groceries").unwrap();
        upsert(&db, groceries, "milk", 1);
        db.write_transaction(|conn| {
            Database::insert_purchase(conn, budget, &NewPurchase::new(date(1), 450, "Milk", Some(groceries)))
        })
        .unwrap();

        assert!(db.delete_budget(budget).unwrap());

        let conn = db.get_conn().unwrap();
        assert!(!Database::budget_exists(&conn, budget).unwrap());
        assert_eq!(Database::category_budget(&conn, groceries).unwrap(), None);
        assert!(Database::fetch_budget_purchases(&conn, budget).unwrap().is_empty());
        drop(conn);
        assert!(db.fetch_term_frequencies(groceries).unwrap().is_empty());
    }

    #[test]
    fn test_matching_terms_scoped_to_budget() {
        let db = Database::open_in_memory().unwrap();
        let home = db.create_budget("Home").unwrap();
        let work = db.create_budget("Work").unwrap();
        let home_groceries = db.create_category(home, "Groceries").unwrap();
        let work_lunch = db.create_category(work, "Lunch").unwrap();

        upsert(&db, home_groceries, "milk", 1);
        upsert(&db, work_lunch, "milk", 1);
        upsert(&db, work_lunch, "sushi", 1);

        let rows = db.fetch_matching_terms(home, &["milk", "sushi"]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].term, "milk");
        assert_eq!(rows[0].category_id, home_groceries);
        assert_eq!(rows[0].gram_length, 1);

        let rows = db.fetch_matching_terms(work, &["milk", "sushi"]).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_matching_terms_across_chunks() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Home").unwrap();
        let category = db.create_category(budget, "Misc").unwrap();
        upsert(&db, category, "needle", 1);

        let mut terms: Vec<String> = (0..MAX_TERMS_PER_QUERY * 2).map(|i| format!("filler{}", i)).collect();
        terms.push("needle".to_string());
        let term_refs: Vec<&str> = terms.iter().map(String::as_str).collect();

        let rows = db.fetch_matching_terms(budget, &term_refs).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].term, "needle");
    }

    #[test]
    fn test_delete_budget_term_frequencies_leaves_other_budgets() {
        let db = Database::open_in_memory().unwrap();
        let home = db.create_budget("Home").unwrap();
        let work = db.create_budget("Work").unwrap();
        let home_groceries = db.create_category(home, "Groceries").unwrap();
        let work_lunch = db.create_category(work, "Lunch").unwrap();
        upsert(&db, home_groceries, "milk", 1);
        upsert(&db, home_groceries, "full cream", 2);
        upsert(&db, work_lunch, "sushi", 1);

        let deleted = db
            .write_transaction(|conn| Database::delete_budget_term_frequencies(conn, home))
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(db.count_budget_term_frequencies(home).unwrap(), 0);
        assert_eq!(db.count_budget_term_frequencies(work).unwrap(), 1);
    }

    #[test]
    fn test_budget_purchases_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let budget = db.create_budget("Home").unwrap();
        db.write_transaction(|conn| {
            Database::insert_purchase(conn, budget, &NewPurchase::new(date(3), 100, "Older", None))?;
            Database::insert_purchase(conn, budget, &NewPurchase::new(date(9), 200, "Newer", None))
        })
        .unwrap();

        let conn = db.get_conn().unwrap();
        let purchases = Database::fetch_budget_purchases(&conn, budget).unwrap();
        let descriptions: Vec<_> = purchases.iter().map(|p| p.description.as_deref().unwrap()).collect();
        assert_eq!(descriptions, vec!["Newer", "Older"]);
        assert_eq!(purchases[0].purchase_date, date(9));
        assert_eq!(purchases[0].amount_cents, 200);
    }
}
