//! Handlers for the `/comparisons` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use prodrank_core::types::DbId;
use prodrank_db::models::comparison::{
    Comparison, ComparisonDetail, ComparisonSummary, CreateComparison, UpdateComparison,
};
use prodrank_db::repositories::ComparisonRepo;

use crate::error::{not_found, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/comparisons
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateComparison>,
) -> AppResult<(StatusCode, Json<Comparison>)> {
    let input = input.validated()?;
    let comparison = ComparisonRepo::create(&state.pool, &input).await?;

    tracing::info!(comparison_id = comparison.id, name = %comparison.name, "Comparison created");

    Ok((StatusCode::CREATED, Json(comparison)))
}

/// GET /api/v1/comparisons
///
/// Newest first, with product and attribute counts.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ComparisonSummary>>> {
    let comparisons = ComparisonRepo::list(&state.pool).await?;
    Ok(Json(comparisons))
}

/// GET /api/v1/comparisons/{id}
///
/// Full detail: attributes, products with their values, and product count.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ComparisonDetail>> {
    let detail = ComparisonRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Comparison", id))?;
    Ok(Json(detail))
}

/// PUT /api/v1/comparisons/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateComparison>,
) -> AppResult<Json<Comparison>> {
    let input = input.validated()?;
    let comparison = ComparisonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Comparison", id))?;
    Ok(Json(comparison))
}

/// DELETE /api/v1/comparisons/{id}
///
/// Cascades to the comparison's attributes, products, and values.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ComparisonRepo::delete(&state.pool, id).await? {
        tracing::info!(comparison_id = id, "Comparison deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Comparison", id))
    }
}
