//! Repository for the `products` table.

use std::collections::HashMap;

use prodrank_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::attribute_value::AttributeValueDetail;
use crate::models::product::{CreateProduct, Product, ProductWithValues, UpdateProduct};
use crate::repositories::AttributeValueRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comparison_id, name, description, created_at, updated_at";

/// Provides CRUD operations for products. Every lookup is scoped to the
/// owning comparison.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product and its initial attribute data in one
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        comparison_id: DbId,
        input: &CreateProduct,
    ) -> Result<ProductWithValues, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO products (comparison_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(comparison_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        AttributeValueRepo::insert_entries(
            &mut tx,
            comparison_id,
            product.id,
            &input.attribute_data,
        )
        .await?;
        let attribute_data = AttributeValueRepo::list_by_product(&mut tx, product.id).await?;
        tx.commit().await?;

        tracing::debug!(
            comparison_id,
            product_id = product.id,
            values = attribute_data.len(),
            "Product created",
        );
        Ok(ProductWithValues {
            product,
            attribute_data,
        })
    }

    /// Find a product (with values) by ID within a comparison.
    pub async fn find_by_id(
        pool: &PgPool,
        comparison_id: DbId,
        id: DbId,
    ) -> Result<Option<ProductWithValues>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND comparison_id = $2");
        let Some(product) = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(comparison_id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };
        let attribute_data = AttributeValueRepo::list_by_product(&mut conn, id).await?;
        Ok(Some(ProductWithValues {
            product,
            attribute_data,
        }))
    }

    /// List a comparison's products (with values) ordered by name.
    pub async fn list_by_comparison(
        pool: &PgPool,
        comparison_id: DbId,
    ) -> Result<Vec<ProductWithValues>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;
        let products = Self::list_rows(&mut tx, comparison_id).await?;
        let values = AttributeValueRepo::list_by_comparison(&mut tx, comparison_id).await?;
        tx.commit().await?;
        Ok(Self::attach_values(products, values))
    }

    /// Product rows of a comparison ordered by name, then ID.
    pub(crate) async fn list_rows(
        conn: &mut PgConnection,
        comparison_id: DbId,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE comparison_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(comparison_id)
            .fetch_all(conn)
            .await
    }

    /// Group `values` under their products, keeping product order and the
    /// order of values within each product.
    pub(crate) fn attach_values(
        products: Vec<Product>,
        values: Vec<AttributeValueDetail>,
    ) -> Vec<ProductWithValues> {
        let mut by_product: HashMap<DbId, Vec<AttributeValueDetail>> = HashMap::new();
        for value in values {
            by_product.entry(value.product_id).or_default().push(value);
        }
        products
            .into_iter()
            .map(|product| {
                let attribute_data = by_product.remove(&product.id).unwrap_or_default();
                ProductWithValues {
                    product,
                    attribute_data,
                }
            })
            .collect()
    }

    /// Update a product. Only non-`None` fields in `input` are applied;
    /// `description: Some(None)` writes NULL.
    ///
    /// Returns `None` if no such product exists in the comparison.
    pub async fn update(
        pool: &PgPool,
        comparison_id: DbId,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($3, name),
                description = CASE WHEN $4 THEN $5 ELSE description END
             WHERE id = $1 AND comparison_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(comparison_id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a product (and, by cascade, its values). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, comparison_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND comparison_id = $2")
            .bind(id)
            .bind(comparison_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
