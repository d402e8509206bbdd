//! Handlers for products nested under `/comparisons/{comparison_id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use prodrank_core::types::DbId;
use prodrank_db::models::attribute_value::ReplaceAttributeValues;
use prodrank_db::models::product::{CreateProduct, ProductWithValues, UpdateProduct};
use prodrank_db::repositories::{AttributeValueRepo, ProductRepo};

use crate::error::{not_found, AppResult};
use crate::extract::AppJson;
use crate::handlers::ensure_comparison_exists;
use crate::state::AppState;

/// POST /api/v1/comparisons/{comparison_id}/products
///
/// Accepts optional `attribute_data: [{attribute_id, value}]`, written in
/// the same transaction as the product.
pub async fn create(
    State(state): State<AppState>,
    Path(comparison_id): Path<DbId>,
    AppJson(input): AppJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<ProductWithValues>)> {
    let input = input.validated()?;
    ensure_comparison_exists(&state, comparison_id).await?;

    let product = ProductRepo::create(&state.pool, comparison_id, &input).await?;

    tracing::info!(
        comparison_id,
        product_id = product.product.id,
        values = product.attribute_data.len(),
        "Product created",
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/comparisons/{comparison_id}/products
pub async fn list_by_comparison(
    State(state): State<AppState>,
    Path(comparison_id): Path<DbId>,
) -> AppResult<Json<Vec<ProductWithValues>>> {
    ensure_comparison_exists(&state, comparison_id).await?;
    let products = ProductRepo::list_by_comparison(&state.pool, comparison_id).await?;
    Ok(Json(products))
}

/// GET /api/v1/comparisons/{comparison_id}/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ProductWithValues>> {
    let product = ProductRepo::find_by_id(&state.pool, comparison_id, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    Ok(Json(product))
}

/// PUT /api/v1/comparisons/{comparison_id}/products/{id}
///
/// Updates name/description only; attribute data goes through
/// [`replace_attributes`].
pub async fn update(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateProduct>,
) -> AppResult<Json<ProductWithValues>> {
    let input = input.validated()?;
    ProductRepo::update(&state.pool, comparison_id, id, &input)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    let product = ProductRepo::find_by_id(&state.pool, comparison_id, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    Ok(Json(product))
}

/// DELETE /api/v1/comparisons/{comparison_id}/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, comparison_id, id).await? {
        tracing::info!(comparison_id, product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Product", id))
    }
}

/// POST /api/v1/comparisons/{comparison_id}/products/{id}/attributes
///
/// Replaces the product's attribute data with the submitted set. Values
/// not present in the submission are removed; resubmitting the same
/// payload yields the same result.
pub async fn replace_attributes(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<ReplaceAttributeValues>,
) -> AppResult<Json<ProductWithValues>> {
    AttributeValueRepo::replace_for_product(&state.pool, comparison_id, id, &input.attribute_data)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    let product = ProductRepo::find_by_id(&state.pool, comparison_id, id)
        .await?
        .ok_or_else(|| not_found("Product", id))?;
    Ok(Json(product))
}
