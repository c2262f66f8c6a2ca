//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{PriceRecord, ProductRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Invalid price {0}: prices must be positive")]
    InvalidPrice(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Products are unique by URL. Every write of a price also appends a history
/// row, so the history always contains the current price.
pub trait Storage {
    // ===== Products =====

    /// Finds a product by its canonical URL
    fn find_product_by_url(&self, url: &str) -> StorageResult<Option<ProductRecord>>;

    /// Gets a product by its storage ID
    fn get_product(&self, product_id: i64) -> StorageResult<Option<ProductRecord>>;

    /// Lists products ordered by ID
    fn list_products(&self, offset: u32, limit: u32) -> StorageResult<Vec<ProductRecord>>;

    /// Starts tracking a product
    ///
    /// If the URL is already tracked the existing product is returned with
    /// its current price updated and the observation appended to its history.
    /// Otherwise the product and its first history row are written together.
    fn insert_product(&mut self, title: &str, url: &str, price: i64)
        -> StorageResult<ProductRecord>;

    // ===== Price history =====

    /// Records a price observation and makes it the current price
    fn append_history(&mut self, product_id: i64, price: i64) -> StorageResult<PriceRecord>;

    /// Lists the most recent observations for a product, newest first
    fn list_history(&self, product_id: i64, limit: u32) -> StorageResult<Vec<PriceRecord>>;

    // ===== Statistics =====

    /// Gets total product count
    fn count_products(&self) -> StorageResult<u64>;

    /// Gets total observation count across all products
    fn count_history(&self) -> StorageResult<u64>;

    /// Checks that the database answers queries
    fn ping(&self) -> StorageResult<()>;
}
