//! Broker responses that drive a leg.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Action a broker takes on its leg of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegAction {
    /// Broker accepts the order.
    Accept,
    /// Broker rejects the order.
    Reject,
    /// Broker allocates an accepted order.
    Allocate,
    /// Broker deletes an accepted order.
    Delete,
    /// Broker refuses a pending cancellation.
    RejectCancel,
}

impl LegAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Accept,
        Self::Reject,
        Self::Allocate,
        Self::Delete,
        Self::RejectCancel,
    ];

    /// Returns true if an operator may initiate the action.
    ///
    /// `RejectCancel` belongs to the cancellation protocol and is never
    /// offered as an operator action.
    #[must_use]
    pub const fn is_operator_action(&self) -> bool {
        !matches!(self, Self::RejectCancel)
    }

    /// Action name as shown to operators.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Reject => "Reject",
            Self::Allocate => "Allocate",
            Self::Delete => "Delete",
            Self::RejectCancel => "RejectCancel",
        }
    }
}

impl fmt::Display for LegAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_cancel_is_protocol_internal() {
        let operator: Vec<_> = LegAction::ALL
            .iter()
            .filter(|a| a.is_operator_action())
            .collect();
        assert_eq!(operator.len(), 4);
        assert!(!LegAction::RejectCancel.is_operator_action());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&LegAction::RejectCancel).unwrap();
        assert_eq!(json, "\"REJECT_CANCEL\"");
    }
}
