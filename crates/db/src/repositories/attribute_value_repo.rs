//! Repository for the `product_attribute_values` table.
//!
//! A product's values are written as a whole: every write replaces the
//! product's complete set, never merges into it.

use std::collections::HashMap;

use prodrank_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::attribute_value::{AttributeValueDetail, AttributeValueInput, AttributeValueRow};

/// Values joined with their attribute metadata.
const JOINED_SELECT: &str = "SELECT v.id, v.product_id, v.value, \
        a.id AS attribute_id, a.name AS attribute_name, a.data_type, a.unit \
     FROM product_attribute_values v \
     JOIN attributes a ON a.id = v.attribute_id";

/// Provides access to stored attribute values.
pub struct AttributeValueRepo;

impl AttributeValueRepo {
    /// List one product's values ordered by attribute name.
    pub async fn list_by_product(
        conn: &mut PgConnection,
        product_id: DbId,
    ) -> Result<Vec<AttributeValueDetail>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE v.product_id = $1 ORDER BY a.name, a.id");
        let rows = sqlx::query_as::<_, AttributeValueRow>(&query)
            .bind(product_id)
            .fetch_all(conn)
            .await?;
        Ok(rows.into_iter().map(AttributeValueDetail::from).collect())
    }

    /// List the values of every product in a comparison, ordered by
    /// attribute name.
    pub async fn list_by_comparison(
        conn: &mut PgConnection,
        comparison_id: DbId,
    ) -> Result<Vec<AttributeValueDetail>, sqlx::Error> {
        let query = format!(
            "{JOINED_SELECT} \
             JOIN products p ON p.id = v.product_id \
             WHERE p.comparison_id = $1 \
             ORDER BY a.name, a.id"
        );
        let rows = sqlx::query_as::<_, AttributeValueRow>(&query)
            .bind(comparison_id)
            .fetch_all(conn)
            .await?;
        Ok(rows.into_iter().map(AttributeValueDetail::from).collect())
    }

    /// Replace a product's attribute data with `entries` in one transaction.
    ///
    /// Existing values are deleted first, so attributes absent from
    /// `entries` lose their value. Entries naming an attribute outside the
    /// product's comparison are skipped. When an attribute appears more
    /// than once the last entry wins, and a `null` last entry leaves it
    /// without a value.
    ///
    /// Returns `None` if the product does not exist in the comparison.
    pub async fn replace_for_product(
        pool: &PgPool,
        comparison_id: DbId,
        product_id: DbId,
        entries: &[AttributeValueInput],
    ) -> Result<Option<Vec<AttributeValueDetail>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Row lock serializes concurrent replacements for the same product.
        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM products WHERE id = $1 AND comparison_id = $2 FOR UPDATE",
        )
        .bind(product_id)
        .bind(comparison_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM product_attribute_values WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let inserted = Self::insert_entries(&mut tx, comparison_id, product_id, entries).await?;
        let values = Self::list_by_product(&mut tx, product_id).await?;
        tx.commit().await?;

        tracing::info!(
            comparison_id,
            product_id,
            removed,
            inserted,
            "Product attribute data replaced",
        );
        Ok(Some(values))
    }

    /// Insert `entries` for a product whose existing values have already
    /// been cleared (or that has none). Returns the number of entries
    /// written.
    ///
    /// Only the last entry per attribute counts, so a trailing `null`
    /// leaves that attribute without a value.
    pub(crate) async fn insert_entries(
        conn: &mut PgConnection,
        comparison_id: DbId,
        product_id: DbId,
        entries: &[AttributeValueInput],
    ) -> Result<u64, sqlx::Error> {
        let mut written = 0;
        for entry in last_entry_per_attribute(entries) {
            let Some(text) = entry.stored_text() else {
                continue;
            };
            let affected = sqlx::query(
                "INSERT INTO product_attribute_values (product_id, attribute_id, value) \
                 SELECT $1, a.id, $3 FROM attributes a \
                 WHERE a.id = $2 AND a.comparison_id = $4",
            )
            .bind(product_id)
            .bind(entry.attribute_id)
            .bind(&text)
            .bind(comparison_id)
            .execute(&mut *conn)
            .await?
            .rows_affected();

            if affected == 0 {
                tracing::debug!(
                    product_id,
                    attribute_id = entry.attribute_id,
                    "Skipping value for attribute outside the comparison",
                );
            }
            written += affected;
        }
        Ok(written)
    }
}

/// Keep the last entry for each attribute, in submission order.
fn last_entry_per_attribute(entries: &[AttributeValueInput]) -> Vec<&AttributeValueInput> {
    let last: HashMap<DbId, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.attribute_id, i))
        .collect();
    entries
        .iter()
        .enumerate()
        .filter(|(i, e)| last.get(&e.attribute_id) == Some(i))
        .map(|(_, e)| e)
        .collect()
}
