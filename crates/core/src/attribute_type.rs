//! Attribute data types and the value model used for ranking.
//!
//! Attribute values are always stored as raw text, whatever the declared
//! type of their attribute. Every read path that needs to order values goes
//! through [`comparable_key`], so the coercion rules live in one place.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Attribute type
// ---------------------------------------------------------------------------

/// Declared type of an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    #[default]
    Text,
    Number,
    Boolean,
}

/// All accepted wire/database spellings, in declaration order.
pub const VALID_ATTRIBUTE_TYPES: &[&str] = &["text", "number", "boolean"];

impl AttributeType {
    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Parse a stored type name. Anything unrecognized is treated as text,
    /// so rows written by older clients always load.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            _ => Self::Text,
        }
    }

    /// Parse a type name supplied by a client. Only the declared types are
    /// accepted.
    pub fn parse_strict(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            _ => Err(CoreError::Validation(format!(
                "Invalid data_type '{s}'. Must be one of: {}",
                VALID_ATTRIBUTE_TYPES.join(", ")
            ))),
        }
    }
}

impl From<String> for AttributeType {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Comparison keys
// ---------------------------------------------------------------------------

/// Lower-cased spellings that a boolean attribute treats as `true`.
pub const TRUTHY_VALUES: &[&str] = &["true", "1", "yes", "on"];

/// Numeric key used when a number attribute holds unparseable text.
pub const MALFORMED_NUMBER_KEY: f64 = 0.0;

/// Directly orderable form of a stored value.
///
/// `Missing` is the sentinel for a product with no value for the sort
/// attribute; the ranking engine always places it last.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Missing,
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl SortKey {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Natural (ascending) order between two present keys of the same kind.
    ///
    /// Keys of different kinds never meet in one sort because the sort
    /// attribute's declared type is applied to every product; they compare
    /// equal here. `Missing` is handled by the caller.
    pub fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Coerce a raw stored value into a comparison key for `data_type`.
///
/// Never fails:
/// - `number`: surrounding whitespace is ignored; unparseable text (and
///   `NaN`) becomes [`MALFORMED_NUMBER_KEY`].
/// - `boolean`: `true` iff the lower-cased text is in [`TRUTHY_VALUES`].
/// - `text`: the lower-cased text.
/// - `None` (no stored value): [`SortKey::Missing`].
pub fn comparable_key(data_type: AttributeType, raw: Option<&str>) -> SortKey {
    let Some(raw) = raw else {
        return SortKey::Missing;
    };

    match data_type {
        AttributeType::Number => SortKey::Number(parse_number(raw)),
        AttributeType::Boolean => {
            let lowered = raw.to_lowercase();
            SortKey::Boolean(TRUTHY_VALUES.contains(&lowered.as_str()))
        }
        AttributeType::Text => SortKey::Text(raw.to_lowercase()),
    }
}

// TODO: return an explicit invalid key instead of 0.0 once clients can
// display malformed numbers separately from a real zero.
fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => MALFORMED_NUMBER_KEY,
    }
}
