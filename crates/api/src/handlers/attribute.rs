//! Handlers for attributes nested under `/comparisons/{comparison_id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use prodrank_core::types::DbId;
use prodrank_db::models::attribute::{Attribute, CreateAttribute, UpdateAttribute};
use prodrank_db::repositories::AttributeRepo;

use crate::error::{not_found, AppResult};
use crate::extract::AppJson;
use crate::handlers::ensure_comparison_exists;
use crate::state::AppState;

/// POST /api/v1/comparisons/{comparison_id}/attributes
pub async fn create(
    State(state): State<AppState>,
    Path(comparison_id): Path<DbId>,
    AppJson(input): AppJson<CreateAttribute>,
) -> AppResult<(StatusCode, Json<Attribute>)> {
    let input = input.validated()?;
    ensure_comparison_exists(&state, comparison_id).await?;

    let attribute = AttributeRepo::create(&state.pool, comparison_id, &input).await?;
    Ok((StatusCode::CREATED, Json(attribute)))
}

/// GET /api/v1/comparisons/{comparison_id}/attributes
pub async fn list_by_comparison(
    State(state): State<AppState>,
    Path(comparison_id): Path<DbId>,
) -> AppResult<Json<Vec<Attribute>>> {
    ensure_comparison_exists(&state, comparison_id).await?;
    let attributes = AttributeRepo::list_by_comparison(&state.pool, comparison_id).await?;
    Ok(Json(attributes))
}

/// GET /api/v1/comparisons/{comparison_id}/attributes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Attribute>> {
    let attribute = AttributeRepo::find_by_id(&state.pool, comparison_id, id)
        .await?
        .ok_or_else(|| not_found("Attribute", id))?;
    Ok(Json(attribute))
}

/// PUT /api/v1/comparisons/{comparison_id}/attributes/{id}
///
/// Changing `data_type` reinterprets existing stored values; they are kept
/// as-is.
pub async fn update(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateAttribute>,
) -> AppResult<Json<Attribute>> {
    let patch = input.validated()?;
    let attribute = AttributeRepo::update(&state.pool, comparison_id, id, &patch)
        .await?
        .ok_or_else(|| not_found("Attribute", id))?;
    Ok(Json(attribute))
}

/// DELETE /api/v1/comparisons/{comparison_id}/attributes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((comparison_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if AttributeRepo::delete(&state.pool, comparison_id, id).await? {
        tracing::info!(comparison_id, attribute_id = id, "Attribute deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Attribute", id))
    }
}
