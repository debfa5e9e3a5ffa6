//! Shared Domain Types
//!
//! Identifiers and temporal value objects shared across the domain.

pub mod value_objects;

pub use value_objects::{BrokerId, OrderId, Timestamp};
