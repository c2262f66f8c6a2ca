//! Statistics generation from the price database

use crate::storage::{PriceRecord, ProductRecord, Storage, StorageResult};
use serde::Serialize;

/// Summary of a product's recent prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceStats {
    pub current_price: i64,

    /// Number of observations in the reported window
    pub total_records: usize,

    /// Newest minus oldest price in the window; positive means the price rose
    ///
    /// A drop from 1000 to 900 is reported as `-100`. Clients that expect
    /// `oldest - newest` (a positive number for a discount) must flip the sign.
    pub price_change: i64,
}

impl PriceStats {
    /// Computes statistics from a newest-first history window
    pub fn from_history(product: &ProductRecord, history: &[PriceRecord]) -> Self {
        let price_change = match (history.first(), history.last()) {
            (Some(newest), Some(oldest)) if history.len() > 1 => newest.price - oldest.price,
            _ => 0,
        };

        Self {
            current_price: product.current_price,
            total_records: history.len(),
            price_change,
        }
    }
}

/// A product together with its recent history and statistics
#[derive(Debug, Clone, Serialize)]
pub struct ProductReport {
    pub product: ProductRecord,
    pub price_history: Vec<PriceRecord>,
    pub stats: PriceStats,
}

/// Loads the report for a product, or `None` if it is not tracked
pub fn load_product_report(
    storage: &dyn Storage,
    product_id: i64,
    limit: u32,
) -> StorageResult<Option<ProductReport>> {
    let Some(product) = storage.get_product(product_id)? else {
        return Ok(None);
    };

    let price_history = storage.list_history(product_id, limit)?;
    let stats = PriceStats::from_history(&product, &price_history);

    Ok(Some(ProductReport {
        product,
        price_history,
        stats,
    }))
}

/// Database-wide statistics
#[derive(Debug, Clone)]
pub struct DatabaseStatistics {
    pub total_products: u64,
    pub total_observations: u64,
    pub products: Vec<ProductRecord>,
}

/// Loads statistics from storage, listing up to `product_limit` products
pub fn load_statistics(
    storage: &dyn Storage,
    product_limit: u32,
) -> StorageResult<DatabaseStatistics> {
    Ok(DatabaseStatistics {
        total_products: storage.count_products()?,
        total_observations: storage.count_history()?,
        products: storage.list_products(0, product_limit)?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &DatabaseStatistics) {
    println!("=== Price Tracker Statistics ===\n");

    println!("Overview:");
    println!("  Tracked products: {}", stats.total_products);
    println!("  Price observations: {}", stats.total_observations);

    if stats.products.is_empty() {
        return;
    }

    println!("\nProducts:");
    for product in &stats.products {
        println!(
            "  [{}] {} - {} ({})",
            product.id, product.title, product.current_price, product.url
        );
    }

    let listed = stats.products.len() as u64;
    if stats.total_products > listed {
        println!("  ... and {} more", stats.total_products - listed);
    }
}
