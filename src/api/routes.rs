use crate::api::handlers;
use crate::api::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Builds the application router
///
/// Unknown paths are served from the static directory; paths that match no
/// file fall back to `index.html` so the frontend can handle them.
pub fn routes(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.server.static_dir);
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/parse/yamarket", get(handlers::parse_product))
        .route("/api/search", get(handlers::search_products))
        .route("/api/track", post(handlers::track_product))
        .route("/api/stats/{product_id}", get(handlers::product_stats))
        .route("/api/tracked-products", get(handlers::tracked_products))
        .route("/api/test-db", get(handlers::test_db))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
