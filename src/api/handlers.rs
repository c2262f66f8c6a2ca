//! Request handlers for the JSON API

use crate::api::{ApiError, AppState};
use crate::history::{load_product_report, ProductReport};
use crate::scrape::ScrapeResult;
use crate::storage::{ProductRecord, Storage};
use crate::url::{canonicalize, is_marketplace_url, validate_product_url};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ParseParams {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_page_size")]
    pub limit: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Body of a track request
#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub title: String,
    pub url: String,
    pub current_price: i64,
}

/// `GET /api/parse/yamarket?url=` scrapes a single product page
pub async fn parse_product(
    State(state): State<AppState>,
    params: Result<Query<ParseParams>, QueryRejection>,
) -> Result<Json<ScrapeResult>, ApiError> {
    let Query(params) = params?;
    Ok(Json(state.scraper.scrape(&params.url).await))
}

/// `GET /api/search?query=` accepts a marketplace URL and returns it as a
/// single search result
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let query = params.query.trim();

    if !is_marketplace_url(query, &state.config.marketplace.host) {
        return Ok(Json(json!({
            "results": [],
            "message": "Enter a Yandex Market product URL to search",
        })));
    }

    let body = match state.scraper.scrape(query).await {
        ScrapeResult::Success(product) => json!({
            "results": [{
                "product_id": product.product_id,
                "title": product.title,
                "price": product.price,
                "url": product.url,
                "source": product.source,
            }]
        }),
        ScrapeResult::Failure { reason } => json!({
            "results": [],
            "error": reason,
        }),
    };

    Ok(Json(body))
}

/// `POST /api/track` starts tracking a product, or records a new observation
/// for one already tracked
pub async fn track_product(
    State(state): State<AppState>,
    request: Result<Json<TrackRequest>, JsonRejection>,
) -> Result<Json<ProductRecord>, ApiError> {
    let Json(request) = request?;
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::Validation("title cannot be empty".to_string()));
    }

    if request.current_price <= 0 {
        return Err(ApiError::Validation(format!(
            "current_price must be positive, got {}",
            request.current_price
        )));
    }

    let url = canonicalize(request.url.trim());
    validate_product_url(url).map_err(|e| ApiError::Validation(format!("invalid url: {}", e)))?;

    let product = state
        .storage()?
        .insert_product(title, url, request.current_price)?;
    tracing::info!("Product tracked: ID {}", product.id);

    Ok(Json(product))
}

/// `GET /api/stats/{product_id}` returns a product with its recent history
pub async fn product_stats(
    State(state): State<AppState>,
    product_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductReport>, ApiError> {
    let Path(product_id) = product_id?;
    tracing::info!("Get stats for product: {}", product_id);

    let report = {
        let storage = state.storage()?;
        load_product_report(&*storage, product_id, state.config.history.default_limit)?
    };

    match report {
        Some(report) => {
            tracing::info!(
                "Stats retrieved: {} price records",
                report.stats.total_records
            );
            Ok(Json(report))
        }
        None => {
            tracing::warn!("Product not found: {}", product_id);
            Err(ApiError::NotFound("Product not found".to_string()))
        }
    }
}

/// `GET /api/tracked-products?skip=&limit=` lists tracked products
pub async fn tracked_products(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    let Query(params) = params?;
    let products = state.storage()?.list_products(params.skip, params.limit)?;
    Ok(Json(products))
}

/// `GET /api/test-db` reports whether the database answers queries
pub async fn test_db(State(state): State<AppState>) -> Json<Value> {
    let result = state
        .storage()
        .and_then(|storage| storage.ping().map_err(ApiError::from));

    match result {
        Ok(()) => Json(json!({ "status": "Database connected successfully" })),
        Err(e) => Json(json!({ "error": e.to_string() })),
    }
}
