//! Product entity model and DTOs.

use prodrank_core::error::CoreError;
use prodrank_core::ranking::{ProductSnapshot, StoredValue};
use prodrank_core::types::{DbId, Timestamp};
use prodrank_core::validation::{normalize_description, validate_name, MAX_PRODUCT_NAME_LEN};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attribute_value::{AttributeValueDetail, AttributeValueInput};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub comparison_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product together with its stored attribute values.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithValues {
    #[serde(flatten)]
    pub product: Product,
    pub attribute_data: Vec<AttributeValueDetail>,
}

impl From<&ProductWithValues> for ProductSnapshot {
    fn from(p: &ProductWithValues) -> Self {
        ProductSnapshot {
            id: p.product.id,
            name: p.product.name.clone(),
            values: p
                .attribute_data
                .iter()
                .map(|v| StoredValue {
                    attribute_name: v.attribute.name.clone(),
                    raw_value: v.value.clone(),
                })
                .collect(),
        }
    }
}

/// DTO for creating a new product, optionally with initial attribute data.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub attribute_data: Vec<AttributeValueInput>,
}

impl CreateProduct {
    pub fn validated(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: validate_name("name", &self.name, MAX_PRODUCT_NAME_LEN)?,
            description: normalize_description(self.description.as_deref()),
            attribute_data: self.attribute_data.clone(),
        })
    }
}

/// DTO for updating an existing product. Absent fields are left
/// unchanged; `description: null` (or blank) clears the description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::present")]
    pub description: Option<Option<String>>,
}

impl UpdateProduct {
    pub fn validated(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: self
                .name
                .as_deref()
                .map(|n| validate_name("name", n, MAX_PRODUCT_NAME_LEN))
                .transpose()?,
            description: self
                .description
                .as_ref()
                .map(|d| normalize_description(d.as_deref())),
        })
    }
}
