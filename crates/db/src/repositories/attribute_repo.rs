//! Repository for the `attributes` table.

use prodrank_core::types::DbId;
use sqlx::PgPool;

use crate::models::attribute::{Attribute, AttributePatch, NewAttribute};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, comparison_id, name, data_type, unit, created_at, updated_at";

/// Provides CRUD operations for attributes. Every lookup is scoped to the
/// owning comparison.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert a new attribute under `comparison_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        comparison_id: DbId,
        input: &NewAttribute,
    ) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attributes (comparison_id, name, data_type, unit)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let attribute = sqlx::query_as::<_, Attribute>(&query)
            .bind(comparison_id)
            .bind(&input.name)
            .bind(input.data_type.as_str())
            .bind(&input.unit)
            .fetch_one(pool)
            .await?;
        tracing::debug!(
            comparison_id,
            attribute_id = attribute.id,
            data_type = %attribute.data_type,
            "Attribute created",
        );
        Ok(attribute)
    }

    /// Find an attribute by ID within a comparison.
    pub async fn find_by_id(
        pool: &PgPool,
        comparison_id: DbId,
        id: DbId,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attributes WHERE id = $1 AND comparison_id = $2");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .bind(comparison_id)
            .fetch_optional(pool)
            .await
    }

    /// List a comparison's attributes ordered by name.
    pub async fn list_by_comparison(
        pool: &PgPool,
        comparison_id: DbId,
    ) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attributes WHERE comparison_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(comparison_id)
            .fetch_all(pool)
            .await
    }

    /// Update an attribute. Only non-`None` fields in `patch` are applied;
    /// `unit: Some(None)` writes NULL.
    ///
    /// Returns `None` if no such attribute exists in the comparison.
    pub async fn update(
        pool: &PgPool,
        comparison_id: DbId,
        id: DbId,
        patch: &AttributePatch,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!(
            "UPDATE attributes SET
                name = COALESCE($3, name),
                data_type = COALESCE($4, data_type),
                unit = CASE WHEN $5 THEN $6 ELSE unit END
             WHERE id = $1 AND comparison_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .bind(comparison_id)
            .bind(&patch.name)
            .bind(patch.data_type.map(|t| t.as_str()))
            .bind(patch.unit.is_some())
            .bind(patch.unit.as_ref().and_then(|u| u.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an attribute (and, by cascade, its stored values).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, comparison_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1 AND comparison_id = $2")
            .bind(id)
            .bind(comparison_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
