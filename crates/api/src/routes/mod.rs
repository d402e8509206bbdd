pub mod comparison;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /comparisons                                          list, create
/// /comparisons/{id}                                     get, update, delete
/// /comparisons/{id}/attributes                          list, create
/// /comparisons/{id}/attributes/{attribute_id}           get, update, delete
/// /comparisons/{id}/products                            list, create
/// /comparisons/{id}/products/{product_id}               get, update, delete
/// /comparisons/{id}/products/{product_id}/attributes    replace attribute data (POST)
/// /comparisons/{id}/results                             ranking (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/comparisons", comparison::router())
}
