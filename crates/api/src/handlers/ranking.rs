//! Handler for ranked comparison results.

use axum::extract::{Path, Query, State};
use axum::Json;
use prodrank_core::ranking::{rank, ComparisonSnapshot, RankingOutcome, RankingRequest};
use prodrank_core::types::DbId;
use prodrank_db::models::comparison::ComparisonDetail;
use prodrank_db::repositories::ComparisonRepo;
use serde::{Deserialize, Serialize};

use crate::error::{not_found, AppResult};
use crate::state::AppState;

/// Query parameters for `GET /comparisons/{id}/results`.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    /// Attribute name to sort by. Omit for natural (name) order.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
}

/// Ranking response: the comparison, its ranked products, and the sort
/// parameters actually applied.
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub comparison: ComparisonDetail,
    #[serde(flatten)]
    pub outcome: RankingOutcome,
}

/// GET /api/v1/comparisons/{comparison_id}/results
pub async fn results(
    State(state): State<AppState>,
    Path(comparison_id): Path<DbId>,
    Query(params): Query<RankingParams>,
) -> AppResult<Json<RankingResponse>> {
    let comparison = ComparisonRepo::find_detail(&state.pool, comparison_id)
        .await?
        .ok_or_else(|| not_found("Comparison", comparison_id))?;

    let request =
        RankingRequest::from_params(params.sort_by.as_deref(), params.sort_order.as_deref());
    let snapshot = ComparisonSnapshot::from(&comparison);
    let outcome = rank(&snapshot, &request);

    tracing::debug!(
        comparison_id,
        sort_by = ?outcome.sort_by,
        sort_order = %outcome.sort_order,
        products = outcome.results.len(),
        "Ranking computed",
    );

    Ok(Json(RankingResponse {
        comparison,
        outcome,
    }))
}
