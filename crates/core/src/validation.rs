//! Input validation for comparisons, attributes, and products.
//!
//! Shared by the DB layer (before writes) and the API layer. Uniqueness is
//! enforced by database constraints, not here.

use crate::error::CoreError;

/// Maximum length of a comparison name.
pub const MAX_COMPARISON_NAME_LEN: usize = 200;
/// Maximum length of an attribute name.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 100;
/// Maximum length of an attribute unit label.
pub const MAX_UNIT_LEN: usize = 20;
/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Validate a required name: non-blank after trimming and at most
/// `max_len` characters. Returns the trimmed name.
pub fn validate_name(field: &str, name: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional unit label. Blank units are normalized to `None`.
pub fn validate_unit(unit: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(unit) = unit.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(CoreError::Validation(format!(
            "unit must be at most {MAX_UNIT_LEN} characters"
        )));
    }
    Ok(Some(unit.to_string()))
}

/// Normalize an optional free-text description: blank becomes `None`,
/// anything else is trimmed.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}
