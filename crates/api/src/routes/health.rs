//! Root-level routes: the service index and the health probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "Product Ranking API";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: IndexEndpoints,
}

#[derive(Serialize)]
pub struct IndexEndpoints {
    pub comparisons: &'static str,
    pub health: &'static str,
}

/// GET /health. Answers 503 while the database is unreachable so load
/// balancers stop routing to this instance.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_healthy = match prodrank_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    };
    let (status, label) = if db_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            service: SERVICE_NAME,
            version: VERSION,
            db_healthy,
        }),
    )
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: SERVICE_NAME,
        version: VERSION,
        endpoints: IndexEndpoints {
            comparisons: "/api/v1/comparisons",
            health: "/health",
        },
    })
}

/// Routes mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
