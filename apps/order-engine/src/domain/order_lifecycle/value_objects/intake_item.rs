//! Buy-side intake item.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Timestamp;

/// One step added to the buy side before the order goes out to brokers.
///
/// The engine treats the label as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeItem {
    label: String,
    added_at: Timestamp,
}

impl IntakeItem {
    /// Create an intake item stamped with the current time.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            added_at: Timestamp::now(),
        }
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the time the item was created.
    #[must_use]
    pub const fn added_at(&self) -> Timestamp {
        self.added_at
    }
}
