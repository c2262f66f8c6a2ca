//! HTTP API for the price tracker
//!
//! This module wires the scraper and the storage layer into an axum router:
//! - JSON endpoints under `/api`
//! - Static frontend files for every other path

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::routes;

use crate::config::Config;
use crate::scrape::Scraper;
use crate::storage::SqliteStorage;
use crate::TrackerError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;

/// Shared state handed to every handler
///
/// The storage guard must never be held across an `.await`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub scraper: Arc<Scraper>,
    pub storage: Arc<Mutex<SqliteStorage>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(scraper: Scraper, storage: SqliteStorage, config: Config) -> Self {
        Self {
            scraper: Arc::new(scraper),
            storage: Arc::new(Mutex::new(storage)),
            config: Arc::new(config),
        }
    }

    /// Locks the storage for a single synchronous operation
    pub fn storage(&self) -> Result<MutexGuard<'_, SqliteStorage>, ApiError> {
        self.storage
            .lock()
            .map_err(|_| ApiError::Internal("storage lock poisoned".to_string()))
    }
}

/// Binds the configured address and serves the API until the process exits
pub async fn serve(state: AppState) -> Result<(), TrackerError> {
    let address = state.config.server.bind_address.clone();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, routes(state)).await?;
    Ok(())
}
