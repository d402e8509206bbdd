#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use prodrank_api::config::ServerConfig;
use prodrank_api::router::build_app_router;
use prodrank_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Same builder as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a comparison and return its ID.
pub async fn create_comparison(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let json = body_json(
        post_json(app, "/api/v1/comparisons", serde_json::json!({ "name": name })).await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create an attribute and return its ID.
pub async fn create_attribute(
    pool: &PgPool,
    comparison_id: i64,
    name: &str,
    data_type: &str,
    unit: Option<&str>,
) -> i64 {
    let app = build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            &format!("/api/v1/comparisons/{comparison_id}/attributes"),
            serde_json::json!({ "name": name, "data_type": data_type, "unit": unit }),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}

/// Create a product with `(attribute_id, value)` pairs and return its ID.
pub async fn create_product(
    pool: &PgPool,
    comparison_id: i64,
    name: &str,
    values: &[(i64, serde_json::Value)],
) -> i64 {
    let attribute_data: Vec<_> = values
        .iter()
        .map(|(id, v)| serde_json::json!({ "attribute_id": id, "value": v }))
        .collect();
    let app = build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            &format!("/api/v1/comparisons/{comparison_id}/products"),
            serde_json::json!({ "name": name, "attribute_data": attribute_data }),
        )
        .await,
    )
    .await;
    json["id"].as_i64().unwrap()
}
