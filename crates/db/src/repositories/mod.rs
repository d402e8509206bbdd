//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attribute_repo;
pub mod attribute_value_repo;
pub mod comparison_repo;
pub mod product_repo;

pub use attribute_repo::AttributeRepo;
pub use attribute_value_repo::AttributeValueRepo;
pub use comparison_repo::ComparisonRepo;
pub use product_repo::ProductRepo;
