//! URL handling module for Price Tracker
//!
//! This module provides product URL canonicalization and validation, and the
//! URL-derived product identity (identifier and fallback title).

mod identity;
mod normalize;

// Re-export main functions
pub use identity::{derive_product_id, title_from_url, FALLBACK_PRODUCT_ID, FALLBACK_TITLE};
pub use normalize::{canonicalize, is_marketplace_url, validate_product_url};
