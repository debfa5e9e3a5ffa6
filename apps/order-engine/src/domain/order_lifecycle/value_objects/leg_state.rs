//! Broker leg state in the response lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one broker's response to the order.
///
/// `PendingAllocation` and `Allocated` are both sub-states of the logical
/// `Accepted` category, see [`LegState::is_accepted`].
///
/// ```text
/// NotAccepted ──Accept──► PendingAllocation ──Allocate──► Allocated
///      │                          │                           │
///    Reject                     Delete                      Delete
///      ▼                          ▼                           ▼
///  Rejected (term.)          Deleted (term.) ◄────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegState {
    /// Broker has not answered yet.
    NotAccepted,
    /// Broker accepted the order; allocation outstanding.
    PendingAllocation,
    /// Broker accepted and allocated the order.
    Allocated,
    /// Broker rejected the order. **Terminal.**
    Rejected,
    /// Broker deleted a previously accepted order. **Terminal.**
    Deleted,
}

impl LegState {
    /// Returns true for every sub-state of the `Accepted` category.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::PendingAllocation | Self::Allocated)
    }

    /// Returns true if the broker allocated the order.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated)
    }

    /// Returns true if the broker rejected the order.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Returns true if the broker deleted the order.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Returns true if no further state transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Deleted)
    }

    /// Operator-facing label for the state.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotAccepted => "Pending",
            Self::PendingAllocation => "Order Confirmed",
            Self::Allocated => "Allocated",
            Self::Rejected => "Rejected",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for LegState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAccepted => write!(f, "NOT_ACCEPTED"),
            Self::PendingAllocation => write!(f, "PENDING_ALLOCATION"),
            Self::Allocated => write!(f, "ALLOCATED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Deleted => write!(f, "DELETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_category_covers_both_sub_states() {
        assert!(!LegState::NotAccepted.is_accepted());
        assert!(LegState::PendingAllocation.is_accepted());
        assert!(LegState::Allocated.is_accepted());
        assert!(!LegState::Rejected.is_accepted());
        assert!(!LegState::Deleted.is_accepted());
    }

    #[test]
    fn terminal_states() {
        assert!(LegState::Rejected.is_terminal());
        assert!(LegState::Deleted.is_terminal());
        assert!(!LegState::NotAccepted.is_terminal());
        assert!(!LegState::Allocated.is_terminal());
    }

    #[test]
    fn labels() {
        assert_eq!(LegState::NotAccepted.label(), "Pending");
        assert_eq!(LegState::PendingAllocation.label(), "Order Confirmed");
        assert_eq!(LegState::Allocated.label(), "Allocated");
    }

    #[test]
    fn display_and_serde_agree() {
        let json = serde_json::to_string(&LegState::PendingAllocation).unwrap();
        assert_eq!(json, "\"PENDING_ALLOCATION\"");
        assert_eq!(LegState::PendingAllocation.to_string(), "PENDING_ALLOCATION");

        let parsed: LegState = serde_json::from_str("\"DELETED\"").unwrap();
        assert_eq!(parsed, LegState::Deleted);
    }
}
