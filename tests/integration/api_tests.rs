use crate::{create_test_config, product_page};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use price_tracker::api::{routes, AppState};
use price_tracker::scrape::Scraper;
use price_tracker::storage::SqliteStorage;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDEX_HTML: &str = "<html><body>Price Tracker</body></html>";

/// Router backed by an in-memory database and a temporary static directory
struct TestApp {
    router: Router,
    _static_dir: TempDir,
}

fn create_test_app(marketplace_host: &str) -> TestApp {
    let static_dir = tempfile::tempdir().expect("Failed to create static dir");
    std::fs::write(static_dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(static_dir.path().join("app.js"), "console.log('app');").unwrap();

    let config = create_test_config(
        marketplace_host,
        static_dir.path().to_str().expect("utf-8 temp path"),
    );
    let scraper = Scraper::new(&config.fetcher).expect("Failed to build scraper");
    let storage = SqliteStorage::new_in_memory().expect("Failed to open storage");

    TestApp {
        router: routes(AppState::new(scraper, storage, config)),
        _static_dir: static_dir,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(router: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

async fn mock_marketplace() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/card/wireless-mouse-x1/123456"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page(
            "Wireless Mouse X1 Pro",
            r#"<script>{"price": "1990"}</script>"#,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/card/blocked/1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_parse_endpoint_returns_scrape_result() {
    let mock_server = mock_marketplace().await;
    let app = create_test_app("127.0.0.1");

    let product_url = format!("{}/card/wireless-mouse-x1/123456", mock_server.uri());
    let uri = format!("/api/parse/yamarket?url={}", encode(&format!("{}?clid=1", product_url)));
    let (status, body) = get_json(&app.router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "price": 1990,
            "title": "Wireless Mouse X1 Pro",
            "url": product_url,
            "product_id": "123456",
            "source": "yamarket",
        })
    );
}

#[tokio::test]
async fn test_parse_endpoint_reports_http_failure() {
    let mock_server = mock_marketplace().await;
    let app = create_test_app("127.0.0.1");

    let uri = format!(
        "/api/parse/yamarket?url={}",
        encode(&format!("{}/card/blocked/1", mock_server.uri()))
    );
    let (status, body) = get_json(&app.router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("403"));
}

#[tokio::test]
async fn test_search_with_plain_text_returns_message() {
    let app = create_test_app("market.yandex.ru");

    let (status, body) = get_json(&app.router, "/api/search?query=wireless+mouse").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_search_without_query() {
    let app = create_test_app("market.yandex.ru");

    let (status, body) = get_json(&app.router, "/api/search").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_search_with_marketplace_url() {
    let mock_server = mock_marketplace().await;
    let app = create_test_app("127.0.0.1");

    let product_url = format!("{}/card/wireless-mouse-x1/123456", mock_server.uri());
    let uri = format!("/api/search?query={}", encode(&format!("  {}  ", product_url)));
    let (status, body) = get_json(&app.router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "results": [{
                "product_id": "123456",
                "title": "Wireless Mouse X1 Pro",
                "price": 1990,
                "url": product_url,
                "source": "yamarket",
            }]
        })
    );
}

#[tokio::test]
async fn test_search_reports_scrape_failure() {
    let mock_server = mock_marketplace().await;
    let app = create_test_app("127.0.0.1");

    let uri = format!(
        "/api/search?query={}",
        encode(&format!("{}/card/blocked/1", mock_server.uri()))
    );
    let (_, body) = get_json(&app.router, &uri).await;

    assert_eq!(body["results"], json!([]));
    assert_eq!(body["error"], json!("HTTP error 403"));
}

#[tokio::test]
async fn test_track_then_stats() {
    let app = create_test_app("market.yandex.ru");
    let url = "https://market.yandex.ru/card/wireless-mouse-x1/123456";

    let (status, product) = post_json(
        &app.router,
        "/api/track",
        json!({ "title": "Wireless Mouse X1", "url": format!("{}?clid=9", url), "current_price": 1990 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["url"], json!(url));
    assert_eq!(product["current_price"], json!(1990));

    let id = product["id"].as_i64().unwrap();

    let (status, again) = post_json(
        &app.router,
        "/api/track",
        json!({ "title": "Wireless Mouse X1", "url": url, "current_price": 1790 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], json!(id));

    let (status, report) = get_json(&app.router, &format!("/api/stats/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["product"]["current_price"], json!(1790));
    assert_eq!(report["price_history"].as_array().unwrap().len(), 2);
    assert_eq!(report["price_history"][0]["price"], json!(1790));
    assert_eq!(
        report["stats"],
        json!({ "current_price": 1790, "total_records": 2, "price_change": -200 })
    );

    let (status, products) = get_json(&app.router, "/api/tracked-products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_track_validation_errors() {
    let app = create_test_app("market.yandex.ru");

    for payload in [
        json!({ "title": "  ", "url": "https://market.yandex.ru/card/a/1", "current_price": 100 }),
        json!({ "title": "Mouse", "url": "https://market.yandex.ru/card/a/1", "current_price": 0 }),
        json!({ "title": "Mouse", "url": "not a url", "current_price": 100 }),
        json!({ "title": "Mouse", "url": "https://market.yandex.ru/card/a/1" }),
        json!({ "title": "Mouse", "url": "https://market.yandex.ru/card/a/1", "current_price": 19.5 }),
    ] {
        let (status, body) = post_json(&app.router, "/api/track", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(body["error"].is_string());
    }

    let (_, products) = get_json(&app.router, "/api/tracked-products").await;
    assert_eq!(products, json!([]));
}

#[tokio::test]
async fn test_stats_for_missing_product() {
    let app = create_test_app("market.yandex.ru");

    let (status, body) = get_json(&app.router, "/api/stats/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn test_tracked_products_pagination() {
    let app = create_test_app("market.yandex.ru");

    for i in 1..=3 {
        post_json(
            &app.router,
            "/api/track",
            json!({ "title": format!("Product {}", i), "url": format!("https://market.yandex.ru/product/{}", i), "current_price": 100 * i }),
        )
        .await;
    }

    let (_, products) = get_json(&app.router, "/api/tracked-products?skip=1&limit=1").await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["title"], json!("Product 2"));
}

#[tokio::test]
async fn test_database_check() {
    let app = create_test_app("market.yandex.ru");

    let (status, body) = get_json(&app.router, "/api/test-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "Database connected successfully" }));
}

#[tokio::test]
async fn test_static_files_and_frontend_fallback() {
    let app = create_test_app("market.yandex.ru");

    for (uri, expected) in [
        ("/", INDEX_HTML),
        ("/app.js", "console.log('app');"),
        ("/products/42", INDEX_HTML),
    ] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(&app.router, request).await;

        assert_eq!(status, StatusCode::OK, "uri {}", uri);
        assert_eq!(String::from_utf8(body).unwrap(), expected, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_malformed_requests_return_json_errors() {
    let app = create_test_app("market.yandex.ru");

    for uri in [
        "/api/parse/yamarket",
        "/api/stats/not-a-number",
        "/api/tracked-products?limit=-1",
    ] {
        let (status, body) = get_json(&app.router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert!(body["error"].is_string(), "uri {}", uri);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/track")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
