//! Order State Machine Service
//!
//! Transition table of the top-level order machine.

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::value_objects::{OrderState, OrderTrigger};

/// Order State Machine for validating triggers.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Get the state a trigger leads to, or `None` if it is not permitted.
    ///
    /// Leg-routed triggers keep the current phase; any phase change they
    /// cause is decided by the engine after the sell side reports back.
    #[must_use]
    pub const fn next_state(from: OrderState, trigger: OrderTrigger) -> Option<OrderState> {
        match (from, trigger) {
            (OrderState::Intake, OrderTrigger::AddIntakeItem) => Some(OrderState::Intake),
            (OrderState::Intake, OrderTrigger::CompleteIntake)
            | (OrderState::Cancelling, OrderTrigger::UndoCancel) => Some(OrderState::Negotiating),
            (OrderState::Negotiating, OrderTrigger::CancelBuySide) => Some(OrderState::Cancelling),
            (
                OrderState::Negotiating | OrderState::Cancelling,
                OrderTrigger::BrokerAccept
                | OrderTrigger::BrokerAllocate
                | OrderTrigger::BrokerReject
                | OrderTrigger::BrokerDelete
                | OrderTrigger::BrokerRejectCancel,
            ) => Some(from),
            (
                OrderState::Intake | OrderState::Negotiating | OrderState::Cancelling,
                OrderTrigger::Close,
            ) => Some(OrderState::Closed),
            // From Intake
            (
                OrderState::Intake,
                OrderTrigger::CancelBuySide
                | OrderTrigger::UndoCancel
                | OrderTrigger::BrokerAccept
                | OrderTrigger::BrokerAllocate
                | OrderTrigger::BrokerReject
                | OrderTrigger::BrokerDelete
                | OrderTrigger::BrokerRejectCancel,
            )
            // From Negotiating
            | (
                OrderState::Negotiating,
                OrderTrigger::AddIntakeItem
                | OrderTrigger::CompleteIntake
                | OrderTrigger::UndoCancel,
            )
            // From Cancelling
            | (
                OrderState::Cancelling,
                OrderTrigger::AddIntakeItem
                | OrderTrigger::CompleteIntake
                | OrderTrigger::CancelBuySide,
            )
            // Terminal
            | (OrderState::Closed, _) => None,
        }
    }

    /// Check if a trigger is permitted in a state.
    #[must_use]
    pub const fn is_permitted(state: OrderState, trigger: OrderTrigger) -> bool {
        Self::next_state(state, trigger).is_some()
    }

    /// Validate a trigger and return the state it leads to.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the trigger is not permitted.
    pub fn validate(state: OrderState, trigger: OrderTrigger) -> Result<OrderState, OrderError> {
        Self::next_state(state, trigger)
            .ok_or_else(|| OrderError::invalid_transition("order", state, trigger))
    }

    /// Get all triggers permitted in a state.
    #[must_use]
    pub fn permitted_triggers(state: OrderState) -> Vec<OrderTrigger> {
        OrderTrigger::ALL
            .into_iter()
            .filter(|trigger| Self::is_permitted(state, *trigger))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_triggers() {
        assert_eq!(
            OrderStateMachine::permitted_triggers(OrderState::Intake),
            vec![
                OrderTrigger::AddIntakeItem,
                OrderTrigger::CompleteIntake,
                OrderTrigger::Close,
            ]
        );
    }

    #[test]
    fn negotiating_triggers() {
        assert_eq!(
            OrderStateMachine::permitted_triggers(OrderState::Negotiating),
            vec![
                OrderTrigger::CancelBuySide,
                OrderTrigger::BrokerAccept,
                OrderTrigger::BrokerAllocate,
                OrderTrigger::BrokerReject,
                OrderTrigger::BrokerDelete,
                OrderTrigger::BrokerRejectCancel,
                OrderTrigger::Close,
            ]
        );
    }

    #[test]
    fn cancelling_triggers() {
        assert_eq!(
            OrderStateMachine::permitted_triggers(OrderState::Cancelling),
            vec![
                OrderTrigger::UndoCancel,
                OrderTrigger::BrokerAccept,
                OrderTrigger::BrokerAllocate,
                OrderTrigger::BrokerReject,
                OrderTrigger::BrokerDelete,
                OrderTrigger::BrokerRejectCancel,
                OrderTrigger::Close,
            ]
        );
    }

    #[test]
    fn closed_permits_nothing() {
        assert!(OrderStateMachine::permitted_triggers(OrderState::Closed).is_empty());
        for trigger in OrderTrigger::ALL {
            let err = OrderStateMachine::validate(OrderState::Closed, trigger).unwrap_err();
            assert!(err.is_invalid_transition());
        }
    }

    #[test]
    fn phase_changes() {
        assert_eq!(
            OrderStateMachine::next_state(OrderState::Intake, OrderTrigger::CompleteIntake),
            Some(OrderState::Negotiating)
        );
        assert_eq!(
            OrderStateMachine::next_state(OrderState::Negotiating, OrderTrigger::CancelBuySide),
            Some(OrderState::Cancelling)
        );
        assert_eq!(
            OrderStateMachine::next_state(OrderState::Cancelling, OrderTrigger::UndoCancel),
            Some(OrderState::Negotiating)
        );
        assert_eq!(
            OrderStateMachine::next_state(OrderState::Cancelling, OrderTrigger::BrokerDelete),
            Some(OrderState::Cancelling)
        );
    }

    #[test]
    fn close_reachable_from_every_active_state() {
        for state in [
            OrderState::Intake,
            OrderState::Negotiating,
            OrderState::Cancelling,
        ] {
            assert_eq!(
                OrderStateMachine::validate(state, OrderTrigger::Close),
                Ok(OrderState::Closed)
            );
        }
    }
}
