//! Strongly-typed identifiers for domain entities.
//!
//! These prevent mixing up order and broker identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for the order managed by one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a new unique identifier using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Slot identifier of a broker within an order's leg pool.
///
/// Brokers are numbered `0..broker_count` when the pool is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BrokerId(u32);

impl BrokerId {
    /// Create a broker identifier from its slot number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the slot number.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Operator-facing broker name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("Broker #{}", self.0)
    }
}

impl fmt::Display for BrokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BrokerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("ord-123");
        assert_eq!(id.as_str(), "ord-123");
        assert_eq!(format!("{id}"), "ord-123");
    }

    #[test]
    fn order_id_generate_is_unique() {
        let id1 = OrderId::generate();
        let id2 = OrderId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn order_id_from_string() {
        let id: OrderId = "ord-123".into();
        assert_eq!(id.as_str(), "ord-123");

        let id: OrderId = String::from("ord-456").into();
        assert_eq!(id.as_str(), "ord-456");
    }

    #[test]
    fn broker_id_display_name() {
        let id = BrokerId::new(2);
        assert_eq!(id.value(), 2);
        assert_eq!(id.to_string(), "2");
        assert_eq!(id.display_name(), "Broker #2");
    }

    #[test]
    fn broker_id_serde_transparent() {
        let json = serde_json::to_string(&BrokerId::new(7)).unwrap();
        assert_eq!(json, "7");

        let parsed: BrokerId = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, BrokerId::from(1));
    }
}
