//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{PriceRecord, ProductRecord};
use crate::TrackerError;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const PRODUCT_COLUMNS: &str = "id, title, url, current_price, created_at";
const HISTORY_COLUMNS: &str = "id, product_id, price, created_at";

/// SQLite storage backend
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at `path` and applies the schema
    pub fn new(path: &Path) -> Result<Self, TrackerError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> Result<Self, TrackerError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Fixed-width timestamps keep lexical and chronological order identical
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<ProductRecord> {
    Ok(ProductRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        current_price: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn price_from_row(row: &Row<'_>) -> rusqlite::Result<PriceRecord> {
    Ok(PriceRecord {
        id: row.get(0)?,
        product_id: row.get(1)?,
        price: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn ensure_positive(price: i64) -> StorageResult<()> {
    if price <= 0 {
        return Err(StorageError::InvalidPrice(price));
    }
    Ok(())
}

/// Appends a history row and updates the product's current price
fn record_price(conn: &Connection, product_id: i64, price: i64) -> StorageResult<PriceRecord> {
    let updated = conn.execute(
        "UPDATE products SET current_price = ?1 WHERE id = ?2",
        params![price, product_id],
    )?;
    if updated == 0 {
        return Err(StorageError::ProductNotFound(product_id));
    }

    let created_at = now_timestamp();
    conn.execute(
        "INSERT INTO price_history (product_id, price, created_at) VALUES (?1, ?2, ?3)",
        params![product_id, price, created_at],
    )?;

    Ok(PriceRecord {
        id: conn.last_insert_rowid(),
        product_id,
        price,
        created_at,
    })
}

impl Storage for SqliteStorage {
    // ===== Products =====

    fn find_product_by_url(&self, url: &str) -> StorageResult<Option<ProductRecord>> {
        let product = self
            .conn
            .query_row(
                &format!("SELECT {} FROM products WHERE url = ?1", PRODUCT_COLUMNS),
                params![url],
                product_from_row,
            )
            .optional()?;
        Ok(product)
    }

    fn get_product(&self, product_id: i64) -> StorageResult<Option<ProductRecord>> {
        let product = self
            .conn
            .query_row(
                &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS),
                params![product_id],
                product_from_row,
            )
            .optional()?;
        Ok(product)
    }

    fn list_products(&self, offset: u32, limit: u32) -> StorageResult<Vec<ProductRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM products ORDER BY id LIMIT ?1 OFFSET ?2",
            PRODUCT_COLUMNS
        ))?;

        let products = stmt
            .query_map(params![limit, offset], product_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    fn insert_product(
        &mut self,
        title: &str,
        url: &str,
        price: i64,
    ) -> StorageResult<ProductRecord> {
        ensure_positive(price)?;

        let tx = self.conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM products WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;

        let product_id = match existing {
            Some(id) => id,
            None => {
                tx.execute(
                    "INSERT INTO products (title, url, current_price, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![title, url, price, now_timestamp()],
                )?;
                tx.last_insert_rowid()
            }
        };

        record_price(&tx, product_id, price)?;

        let product = tx.query_row(
            &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS),
            params![product_id],
            product_from_row,
        )?;

        tx.commit()?;
        Ok(product)
    }

    // ===== Price history =====

    fn append_history(&mut self, product_id: i64, price: i64) -> StorageResult<PriceRecord> {
        ensure_positive(price)?;

        let tx = self.conn.transaction()?;
        let record = record_price(&tx, product_id, price)?;
        tx.commit()?;
        Ok(record)
    }

    fn list_history(&self, product_id: i64, limit: u32) -> StorageResult<Vec<PriceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM price_history WHERE product_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2",
            HISTORY_COLUMNS
        ))?;

        let history = stmt
            .query_map(params![product_id, limit], price_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    // ===== Statistics =====

    fn count_products(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_history(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM price_history", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn ping(&self) -> StorageResult<()> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}
