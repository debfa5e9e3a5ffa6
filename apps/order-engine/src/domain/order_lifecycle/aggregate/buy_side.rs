//! Buy-side intake accumulator.

use serde::Serialize;

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::value_objects::IntakeItem;

/// Collects intake items until the completion threshold is reached.
///
/// Immutable once complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuySide {
    items: Vec<IntakeItem>,
    threshold: usize,
}

impl BuySide {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self {
            items: Vec::new(),
            threshold,
        }
    }

    /// Append an item.
    ///
    /// Returns true if this item completed the intake.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the intake is already complete.
    pub fn add(&mut self, item: IntakeItem) -> Result<bool, OrderError> {
        if self.is_completed() {
            return Err(OrderError::invalid_transition(
                "buy side",
                "COMPLETED",
                "ADD_INTAKE_ITEM",
            ));
        }
        self.items.push(item);
        Ok(self.is_completed())
    }

    /// Get the number of items collected.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true once the threshold is reached.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.items.len() >= self.threshold
    }

    /// Get the collected items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[IntakeItem] {
        &self.items
    }

    /// Get the completion threshold.
    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_at_threshold() {
        let mut buy_side = BuySide::new(2);
        assert!(!buy_side.add(IntakeItem::new("Buy side step 1")).unwrap());
        assert!(!buy_side.is_completed());
        assert!(buy_side.add(IntakeItem::new("Buy side step 2")).unwrap());
        assert!(buy_side.is_completed());
        assert_eq!(buy_side.count(), 2);
        assert_eq!(buy_side.items()[1].label(), "Buy side step 2");
    }

    #[test]
    fn rejects_items_after_completion() {
        let mut buy_side = BuySide::new(1);
        buy_side.add(IntakeItem::new("only")).unwrap();
        let err = buy_side.add(IntakeItem::new("late")).unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(buy_side.count(), 1);
    }
}
