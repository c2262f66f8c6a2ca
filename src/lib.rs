//! Price Tracker: marketplace price history service
//!
//! This crate scrapes product pages from a single marketplace, extracts
//! their price and title, and records the observed prices over time behind
//! a small JSON API.

pub mod api;
pub mod config;
pub mod history;
pub mod scrape;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Price Tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

// Re-export commonly used types
pub use config::Config;
pub use scrape::{ScrapeResult, Scraper};
pub use url::{canonicalize, derive_product_id, title_from_url};
