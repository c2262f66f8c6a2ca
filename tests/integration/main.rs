//! Integration tests for Price Tracker
//!
//! These tests use wiremock to stand in for the marketplace and exercise the
//! scraper and the HTTP API end-to-end.

mod api_tests;

use price_tracker::config::{Config, FetcherConfig};

/// Product page in the shape the marketplace serves
pub fn product_page(title: &str, price_markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title} - Яндекс Маркет</title>
    <meta property="og:title" content="{title}">
</head>
<body>
    <h1 class="product-title" data-auto="title">{title}</h1>
    <div class="price-block">{price_markup}</div>
</body>
</html>"#
    )
}

/// Creates a test configuration for a mock marketplace
pub fn create_test_config(marketplace_host: &str, static_dir: &str) -> Config {
    let mut config = Config::default();
    config.server.static_dir = static_dir.to_string();
    config.marketplace.host = marketplace_host.to_string();
    config.fetcher = FetcherConfig {
        timeout_ms: 500,
        ..FetcherConfig::default()
    };
    config
}
