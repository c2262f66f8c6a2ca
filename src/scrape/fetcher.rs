//! HTTP fetcher implementation
//!
//! This module handles the single GET request made for each scrape:
//! - Building the HTTP client with browser-like headers and a timeout
//! - Classifying failures into timeouts, non-200 statuses and transport errors
//!
//! There is no retry: any failure is surfaced to the caller immediately.

use crate::config::FetcherConfig;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Reasons a page fetch can fail
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a status other than 200
    #[error("HTTP error {0}")]
    HttpStatus(u16),

    /// Connection, TLS, or body decoding failure
    #[error("{0}")]
    Transport(String),
}

/// Builds the HTTP client used for marketplace requests
///
/// The client is constructed once at startup and shared by every scrape.
///
/// # Example
///
/// ```no_run
/// use price_tracker::config::FetcherConfig;
/// use price_tracker::scrape::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches marketplace pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    accept: String,
    accept_language: String,
}

impl Fetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?, config))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, config: &FetcherConfig) -> Self {
        Self {
            client,
            accept: config.accept.clone(),
            accept_language: config.accept_language.clone(),
        }
    }

    /// Fetches a URL and returns the response body
    ///
    /// The caller is expected to pass a canonical URL (query string already
    /// removed).
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | HTTP 200 | `Ok(body)` |
    /// | Any other status | `HttpStatus(code)` |
    /// | Timeout (connect, headers or body) | `Timeout` |
    /// | Anything else | `Transport(message)` |
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, self.accept.as_str())
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        tracing::info!("Fetched {} with status {}", url, status.as_u16());

        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(classify_error)
    }
}

fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(error.to_string())
    }
}
