//! Triggers of the top-level order machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LegAction;

/// Trigger accepted by the order engine.
///
/// `CompleteIntake` and `UndoCancel` are fired by the engine itself; the
/// remaining triggers correspond to public commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTrigger {
    /// Add an item to the buy-side accumulator.
    AddIntakeItem,
    /// Intake threshold reached.
    CompleteIntake,
    /// Buy side requests cancellation.
    CancelBuySide,
    /// Every still-active broker refused the cancellation.
    UndoCancel,
    /// Broker accepted its leg.
    BrokerAccept,
    /// Broker allocated its leg.
    BrokerAllocate,
    /// Broker rejected its leg.
    BrokerReject,
    /// Broker deleted its leg.
    BrokerDelete,
    /// Broker refused the cancellation.
    BrokerRejectCancel,
    /// Close the order.
    Close,
}

impl OrderTrigger {
    /// Every trigger, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::AddIntakeItem,
        Self::CompleteIntake,
        Self::CancelBuySide,
        Self::UndoCancel,
        Self::BrokerAccept,
        Self::BrokerAllocate,
        Self::BrokerReject,
        Self::BrokerDelete,
        Self::BrokerRejectCancel,
        Self::Close,
    ];

    /// Trigger that routes the given leg action.
    #[must_use]
    pub const fn for_leg_action(action: LegAction) -> Self {
        match action {
            LegAction::Accept => Self::BrokerAccept,
            LegAction::Reject => Self::BrokerReject,
            LegAction::Allocate => Self::BrokerAllocate,
            LegAction::Delete => Self::BrokerDelete,
            LegAction::RejectCancel => Self::BrokerRejectCancel,
        }
    }

    /// Returns true if the engine fires this trigger on its own.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::CompleteIntake | Self::UndoCancel)
    }
}

impl fmt::Display for OrderTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddIntakeItem => "ADD_INTAKE_ITEM",
            Self::CompleteIntake => "COMPLETE_INTAKE",
            Self::CancelBuySide => "CANCEL_BUY_SIDE",
            Self::UndoCancel => "UNDO_CANCEL",
            Self::BrokerAccept => "BROKER_ACCEPT",
            Self::BrokerAllocate => "BROKER_ALLOCATE",
            Self::BrokerReject => "BROKER_REJECT",
            Self::BrokerDelete => "BROKER_DELETE",
            Self::BrokerRejectCancel => "BROKER_REJECT_CANCEL",
            Self::Close => "CLOSE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_leg_action_maps_to_its_own_trigger() {
        let triggers: std::collections::HashSet<_> = LegAction::ALL
            .into_iter()
            .map(OrderTrigger::for_leg_action)
            .collect();
        assert!(triggers.iter().all(|t| !t.is_internal()));
        assert_eq!(triggers.len(), LegAction::ALL.len());
    }

    #[test]
    fn internal_triggers() {
        let internal: Vec<_> = OrderTrigger::ALL
            .into_iter()
            .filter(OrderTrigger::is_internal)
            .collect();
        assert_eq!(
            internal,
            vec![OrderTrigger::CompleteIntake, OrderTrigger::UndoCancel]
        );
    }
}
