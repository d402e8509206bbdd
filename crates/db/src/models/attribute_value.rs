//! Per-product attribute values.
//!
//! Values are stored as raw text regardless of the attribute's declared
//! type; interpretation happens in `prodrank_core::attribute_type`.

use prodrank_core::attribute_type::AttributeType;
use prodrank_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Flat join of `product_attribute_values` with `attributes`.
#[derive(Debug, Clone, FromRow)]
pub struct AttributeValueRow {
    pub id: DbId,
    pub product_id: DbId,
    pub value: String,
    pub attribute_id: DbId,
    pub attribute_name: String,
    #[sqlx(try_from = "String")]
    pub data_type: AttributeType,
    pub unit: Option<String>,
}

/// Attribute metadata nested inside a value on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeRef {
    pub id: DbId,
    pub name: String,
    pub data_type: AttributeType,
    pub unit: Option<String>,
}

/// A stored value with its attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeValueDetail {
    pub id: DbId,
    #[serde(skip)]
    pub product_id: DbId,
    pub attribute: AttributeRef,
    pub value: String,
}

impl From<AttributeValueRow> for AttributeValueDetail {
    fn from(row: AttributeValueRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            attribute: AttributeRef {
                id: row.attribute_id,
                name: row.attribute_name,
                data_type: row.data_type,
                unit: row.unit,
            },
            value: row.value,
        }
    }
}

/// One submitted `{attribute_id, value}` pair.
///
/// `value` accepts any JSON scalar so clients may send `1200`, `true`, or
/// `"1200"` interchangeably.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeValueInput {
    pub attribute_id: DbId,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl AttributeValueInput {
    /// Text to persist, or `None` when the entry carries no value.
    pub fn stored_text(&self) -> Option<String> {
        match &self.value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }
}

/// Request body for replacing a product's attribute data.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceAttributeValues {
    #[serde(default)]
    pub attribute_data: Vec<AttributeValueInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(value: serde_json::Value) -> AttributeValueInput {
        AttributeValueInput {
            attribute_id: 1,
            value,
        }
    }

    #[test]
    fn strings_are_stored_verbatim() {
        assert_eq!(
            input(serde_json::json!(" 16 GB ")).stored_text().as_deref(),
            Some(" 16 GB ")
        );
    }

    #[test]
    fn scalars_are_stored_as_text() {
        assert_eq!(
            input(serde_json::json!(1200)).stored_text().as_deref(),
            Some("1200")
        );
        assert_eq!(
            input(serde_json::json!(2.5)).stored_text().as_deref(),
            Some("2.5")
        );
        assert_eq!(
            input(serde_json::json!(true)).stored_text().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn null_and_absent_values_are_skipped() {
        assert_eq!(input(serde_json::Value::Null).stored_text(), None);
        let parsed: AttributeValueInput =
            serde_json::from_str(r#"{"attribute_id": 3}"#).unwrap();
        assert_eq!(parsed.stored_text(), None);
    }
}
