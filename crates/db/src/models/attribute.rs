//! Attribute entity model and DTOs.

use prodrank_core::attribute_type::AttributeType;
use prodrank_core::error::CoreError;
use prodrank_core::types::{DbId, Timestamp};
use prodrank_core::validation::{validate_name, validate_unit, MAX_ATTRIBUTE_NAME_LEN};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An attribute row from the `attributes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attribute {
    pub id: DbId,
    pub comparison_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub data_type: AttributeType,
    pub unit: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new attribute.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttribute {
    pub name: String,
    /// Defaults to `text` if omitted.
    pub data_type: Option<String>,
    pub unit: Option<String>,
}

/// Validated attribute fields ready to insert.
#[derive(Debug, Clone)]
pub struct NewAttribute {
    pub name: String,
    pub data_type: AttributeType,
    pub unit: Option<String>,
}

impl CreateAttribute {
    pub fn validated(&self) -> Result<NewAttribute, CoreError> {
        let data_type = match self.data_type.as_deref() {
            Some(t) => AttributeType::parse_strict(t)?,
            None => AttributeType::default(),
        };
        Ok(NewAttribute {
            name: validate_name("name", &self.name, MAX_ATTRIBUTE_NAME_LEN)?,
            data_type,
            unit: validate_unit(self.unit.as_deref())?,
        })
    }
}

/// DTO for updating an existing attribute. Absent fields are left
/// unchanged; `unit: null` (or blank) clears the unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttribute {
    pub name: Option<String>,
    pub data_type: Option<String>,
    #[serde(default, deserialize_with = "crate::models::present")]
    pub unit: Option<Option<String>>,
}

/// Validated attribute patch. `unit: Some(None)` clears the unit.
#[derive(Debug, Clone, Default)]
pub struct AttributePatch {
    pub name: Option<String>,
    pub data_type: Option<AttributeType>,
    pub unit: Option<Option<String>>,
}

impl UpdateAttribute {
    pub fn validated(&self) -> Result<AttributePatch, CoreError> {
        Ok(AttributePatch {
            name: self
                .name
                .as_deref()
                .map(|n| validate_name("name", n, MAX_ATTRIBUTE_NAME_LEN))
                .transpose()?,
            data_type: self
                .data_type
                .as_deref()
                .map(AttributeType::parse_strict)
                .transpose()?,
            unit: self
                .unit
                .as_ref()
                .map(|u| validate_unit(u.as_deref()))
                .transpose()?,
        })
    }
}
