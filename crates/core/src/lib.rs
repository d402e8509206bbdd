//! Domain logic for product comparisons.
//!
//! Pure, synchronous code only: the value model that coerces stored
//! attribute text into comparison keys, the ranking engine, and input
//! validation shared by the DB and API layers.

pub mod attribute_type;
pub mod error;
pub mod ranking;
pub mod types;
pub mod validation;
