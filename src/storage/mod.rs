//! Storage module for persisting tracked products
//!
//! This module handles all database operations for the tracker, including:
//! - SQLite database initialization and schema management
//! - Product records keyed by unique URL
//! - Append-only price history

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::TrackerError;
use serde::Serialize;
use std::path::Path;

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, TrackerError> {
    SqliteStorage::new(path)
}

/// Represents a tracked product in the database
///
/// `id` is the storage primary key, unrelated to the URL-derived product
/// identifier reported by scrapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub current_price: i64,
    pub created_at: String,
}

/// Represents one observed price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRecord {
    pub id: i64,
    pub product_id: i64,
    pub price: i64,
    pub created_at: String,
}
