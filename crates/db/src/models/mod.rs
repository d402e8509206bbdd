//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod attribute;
pub mod attribute_value;
pub mod comparison;
pub mod product;

use serde::{Deserialize, Deserializer};

/// `deserialize_with` target for `Option<Option<T>>` patch fields: a
/// present field, even an explicit `null`, becomes `Some`. Pair with
/// `#[serde(default)]` so an absent field stays `None` (leave unchanged).
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
