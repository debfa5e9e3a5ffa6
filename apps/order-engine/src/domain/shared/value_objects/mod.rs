//! Shared Value Objects
//!
//! Immutable types used across the order lifecycle context.

mod identifiers;
mod timestamp;

pub use identifiers::{BrokerId, OrderId};
pub use timestamp::Timestamp;
