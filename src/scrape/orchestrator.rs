//! Scrape orchestration
//!
//! Composes the fetcher and the extractor into a single call. Every path
//! through [`Scraper::scrape`] yields a [`ScrapeResult`]; no error escapes.

use crate::config::FetcherConfig;
use crate::scrape::extractor::extract;
use crate::scrape::fetcher::Fetcher;
use crate::scrape::ScrapeResult;
use crate::url::canonicalize;

/// Scrapes marketplace product pages
///
/// Holds the HTTP client for the lifetime of the process. Concurrent calls
/// share nothing mutable, so a single instance can be used from many tasks.
#[derive(Debug, Clone)]
pub struct Scraper {
    fetcher: Fetcher,
}

impl Scraper {
    /// Creates a scraper with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Scrapes a product URL
    ///
    /// The query string is dropped before fetching, so `U?x=1` and `U?y=2`
    /// fetch the same page and report `U` as their URL.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use price_tracker::config::FetcherConfig;
    /// use price_tracker::scrape::{ScrapeResult, Scraper};
    ///
    /// # async fn example() {
    /// let scraper = Scraper::new(&FetcherConfig::default()).unwrap();
    /// match scraper.scrape("https://market.yandex.ru/card/mouse/123?clid=9").await {
    ///     ScrapeResult::Success(product) => println!("{}: {}", product.title, product.price),
    ///     ScrapeResult::Failure { reason } => println!("failed: {}", reason),
    /// }
    /// # }
    /// ```
    pub async fn scrape(&self, product_url: &str) -> ScrapeResult {
        let clean_url = canonicalize(product_url);
        tracing::info!("Scraping {}", clean_url);

        let html = match self.fetcher.fetch(clean_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", clean_url, e);
                return ScrapeResult::failure(e.to_string());
            }
        };

        let result = extract(&html, clean_url).into_result(clean_url);
        match &result {
            ScrapeResult::Success(product) => {
                tracing::info!(
                    "Scraped {} (id {}) at {}",
                    product.title,
                    product.product_id,
                    product.price
                );
            }
            ScrapeResult::Failure { reason } => {
                tracing::warn!("Extraction failed for {}: {}", clean_url, reason);
            }
        }

        result
    }
}
