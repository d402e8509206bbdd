//! Comparison entity model and DTOs.

use prodrank_core::error::CoreError;
use prodrank_core::ranking::{AttributeSpec, ComparisonSnapshot, ProductSnapshot};
use prodrank_core::types::{DbId, Timestamp};
use prodrank_core::validation::{normalize_description, validate_name, MAX_COMPARISON_NAME_LEN};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attribute::Attribute;
use crate::models::product::ProductWithValues;

/// A comparison row from the `comparisons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comparison {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List-view row: a comparison plus child counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComparisonSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_count: i64,
    pub attribute_count: i64,
}

/// A comparison with its attributes and products (each with values).
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonDetail {
    #[serde(flatten)]
    pub comparison: Comparison,
    pub attributes: Vec<Attribute>,
    pub products: Vec<ProductWithValues>,
    pub product_count: i64,
}

impl From<&ComparisonDetail> for ComparisonSnapshot {
    fn from(detail: &ComparisonDetail) -> Self {
        ComparisonSnapshot {
            attributes: detail
                .attributes
                .iter()
                .map(|a| AttributeSpec {
                    name: a.name.clone(),
                    data_type: a.data_type,
                    unit: a.unit.clone(),
                })
                .collect(),
            products: detail
                .products
                .iter()
                .map(ProductSnapshot::from)
                .collect(),
        }
    }
}

/// DTO for creating a new comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComparison {
    pub name: String,
    pub description: Option<String>,
}

impl CreateComparison {
    /// Trim and length-check the name.
    pub fn validated(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: validate_name("name", &self.name, MAX_COMPARISON_NAME_LEN)?,
            description: normalize_description(self.description.as_deref()),
        })
    }
}

/// DTO for updating an existing comparison. Absent fields are left
/// unchanged; `description: null` (or blank) clears the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComparison {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::present")]
    pub description: Option<Option<String>>,
}

impl UpdateComparison {
    pub fn validated(&self) -> Result<Self, CoreError> {
        let name = self
            .name
            .as_deref()
            .map(|n| validate_name("name", n, MAX_COMPARISON_NAME_LEN))
            .transpose()?;
        Ok(Self {
            name,
            description: self
                .description
                .as_ref()
                .map(|d| normalize_description(d.as_deref())),
        })
    }
}
