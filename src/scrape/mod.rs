//! Scrape module for marketplace product pages
//!
//! This module contains the scraping core, including:
//! - HTTP fetching with browser-like headers and a timeout
//! - Price, title and identifier extraction from page text
//! - Orchestration into a uniform success/failure result

mod extractor;
mod fetcher;
mod orchestrator;

pub use extractor::{
    extract, extract_price, extract_title, Extraction, PRICE_NOT_FOUND, SOURCE_TAG,
};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use orchestrator::Scraper;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A successfully scraped product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedProduct {
    /// Price in whole currency units, always positive
    pub price: i64,
    pub title: String,
    /// Canonical URL the page was fetched from
    pub url: String,
    /// URL-derived identifier, independent of storage keys
    pub product_id: String,
    /// Marketplace tag
    pub source: &'static str,
}

/// Outcome of a scrape
///
/// Serializes as `{"success": true, "price", "title", "url", "product_id",
/// "source"}` or `{"success": false, "error"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeResult {
    Success(ScrapedProduct),
    Failure { reason: String },
}

impl ScrapeResult {
    /// Builds a success for the marketplace this crate scrapes
    pub fn success(
        price: i64,
        title: impl Into<String>,
        url: impl Into<String>,
        product_id: impl Into<String>,
    ) -> Self {
        Self::Success(ScrapedProduct {
            price,
            title: title.into(),
            url: url.into(),
            product_id: product_id.into(),
            source: SOURCE_TAG,
        })
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl Serialize for ScrapeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(product) => {
                let mut state = serializer.serialize_struct("ScrapeResult", 6)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("price", &product.price)?;
                state.serialize_field("title", &product.title)?;
                state.serialize_field("url", &product.url)?;
                state.serialize_field("product_id", &product.product_id)?;
                state.serialize_field("source", product.source)?;
                state.end()
            }
            Self::Failure { reason } => {
                let mut state = serializer.serialize_struct("ScrapeResult", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", reason)?;
                state.end()
            }
        }
    }
}
