pub mod attribute;
pub mod comparison;
pub mod product;
pub mod ranking;

use prodrank_core::types::DbId;
use prodrank_db::repositories::ComparisonRepo;

use crate::error::{not_found, AppResult};
use crate::state::AppState;

/// Fail with 404 unless the comparison exists.
pub(crate) async fn ensure_comparison_exists(
    state: &AppState,
    comparison_id: DbId,
) -> AppResult<()> {
    if ComparisonRepo::exists(&state.pool, comparison_id).await? {
        Ok(())
    } else {
        Err(not_found("Comparison", comparison_id))
    }
}
