//! Route definitions for the `/comparisons` resource.
//!
//! Attributes, products, and ranking results are nested under
//! `/comparisons/{comparison_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attribute, comparison, product, ranking};
use crate::state::AppState;

/// Routes mounted at `/comparisons`.
///
/// ```text
/// GET    /                                            -> list
/// POST   /                                            -> create
/// GET    /{comparison_id}                             -> get_by_id
/// PUT    /{comparison_id}                             -> update
/// DELETE /{comparison_id}                             -> delete
///
/// GET    /{comparison_id}/attributes                  -> list_by_comparison
/// POST   /{comparison_id}/attributes                  -> create
/// GET    /{comparison_id}/attributes/{id}             -> get_by_id
/// PUT    /{comparison_id}/attributes/{id}             -> update
/// DELETE /{comparison_id}/attributes/{id}             -> delete
///
/// GET    /{comparison_id}/products                    -> list_by_comparison
/// POST   /{comparison_id}/products                    -> create
/// GET    /{comparison_id}/products/{id}               -> get_by_id
/// PUT    /{comparison_id}/products/{id}               -> update
/// DELETE /{comparison_id}/products/{id}               -> delete
/// POST   /{comparison_id}/products/{id}/attributes    -> replace_attributes
///
/// GET    /{comparison_id}/results                     -> results
/// ```
pub fn router() -> Router<AppState> {
    let attribute_routes = Router::new()
        .route(
            "/",
            get(attribute::list_by_comparison).post(attribute::create),
        )
        .route(
            "/{id}",
            get(attribute::get_by_id)
                .put(attribute::update)
                .delete(attribute::delete),
        );

    let product_routes = Router::new()
        .route("/", get(product::list_by_comparison).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/{id}/attributes", post(product::replace_attributes));

    Router::new()
        .route("/", get(comparison::list).post(comparison::create))
        .route(
            "/{comparison_id}",
            get(comparison::get_by_id)
                .put(comparison::update)
                .delete(comparison::delete),
        )
        .route("/{comparison_id}/results", get(ranking::results))
        .nest("/{comparison_id}/attributes", attribute_routes)
        .nest("/{comparison_id}/products", product_routes)
}
