//! Repository for the `comparisons` table.

use prodrank_core::types::DbId;
use sqlx::PgPool;

use crate::models::attribute::Attribute;
use crate::models::comparison::{
    Comparison, ComparisonDetail, ComparisonSummary, CreateComparison, UpdateComparison,
};
use crate::repositories::attribute_repo::COLUMNS as ATTRIBUTE_COLUMNS;
use crate::repositories::{AttributeValueRepo, ProductRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for comparisons.
pub struct ComparisonRepo;

impl ComparisonRepo {
    /// Insert a new comparison, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComparison,
    ) -> Result<Comparison, sqlx::Error> {
        let query = format!(
            "INSERT INTO comparisons (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let comparison = sqlx::query_as::<_, Comparison>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await?;
        tracing::debug!(comparison_id = comparison.id, "Comparison created");
        Ok(comparison)
    }

    /// Find a comparison by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comparison>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comparisons WHERE id = $1");
        sqlx::query_as::<_, Comparison>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a comparison with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comparisons WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all comparisons, newest first, with product and attribute counts.
    pub async fn list(pool: &PgPool) -> Result<Vec<ComparisonSummary>, sqlx::Error> {
        sqlx::query_as::<_, ComparisonSummary>(
            "SELECT c.id, c.name, c.description, c.created_at, c.updated_at,
                    (SELECT COUNT(*) FROM products p WHERE p.comparison_id = c.id) AS product_count,
                    (SELECT COUNT(*) FROM attributes a WHERE a.comparison_id = c.id) AS attribute_count
             FROM comparisons c
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Load a comparison with its attributes and products in one
    /// read-only, repeatable-read transaction, so every part reflects the
    /// same point in time.
    ///
    /// Attributes and products are ordered by name; each product's values
    /// are ordered by attribute name.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComparisonDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM comparisons WHERE id = $1");
        let Some(comparison) = sqlx::query_as::<_, Comparison>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.commit().await?;
            return Ok(None);
        };

        let query = format!(
            "SELECT {ATTRIBUTE_COLUMNS} FROM attributes WHERE comparison_id = $1 ORDER BY name, id"
        );
        let attributes = sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        let products = ProductRepo::list_rows(&mut *tx, id).await?;
        let values = AttributeValueRepo::list_by_comparison(&mut *tx, id).await?;
        tx.commit().await?;

        let products = ProductRepo::attach_values(products, values);
        let product_count = products.len() as i64;

        Ok(Some(ComparisonDetail {
            comparison,
            attributes,
            products,
            product_count,
        }))
    }

    /// Update a comparison. Only non-`None` fields in `input` are applied;
    /// `description: Some(None)` writes NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComparison,
    ) -> Result<Option<Comparison>, sqlx::Error> {
        let query = format!(
            "UPDATE comparisons SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comparison>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a comparison and, by cascade, its attributes, products, and
    /// values. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comparisons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
