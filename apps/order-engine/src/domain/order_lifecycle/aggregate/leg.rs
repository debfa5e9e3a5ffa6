//! Broker leg of an order.

use serde::Serialize;

use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::value_objects::{LegAction, LegState};
use crate::domain::shared::BrokerId;

/// Result of applying an action to a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegOutcome {
    /// The leg moved to a new state.
    Transitioned {
        /// State before the action.
        from: LegState,
        /// State after the action.
        to: LegState,
    },
    /// The broker refused the cancellation; state unchanged.
    CancelRefused,
    /// The action had no effect (allocating an allocated leg).
    Ignored,
}

impl LegOutcome {
    /// Returns true if the leg raised a change notification.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One broker's response slot within an order.
///
/// `cancel_rejected` is tracked apart from `state` because a cancellation
/// refusal coexists with the accepted sub-states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    broker_id: BrokerId,
    state: LegState,
    cancel_rejected: bool,
}

impl Leg {
    /// Create a leg that has not been answered yet.
    #[must_use]
    pub const fn new(broker_id: BrokerId) -> Self {
        Self {
            broker_id,
            state: LegState::NotAccepted,
            cancel_rejected: false,
        }
    }

    /// Get the broker ID.
    #[must_use]
    pub const fn broker_id(&self) -> BrokerId {
        self.broker_id
    }

    /// Get the state.
    #[must_use]
    pub const fn state(&self) -> LegState {
        self.state
    }

    /// Returns true in `PendingAllocation` or `Allocated`.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.state.is_accepted()
    }

    /// Returns true in `Allocated`.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.state.is_allocated()
    }

    /// Returns true in `Deleted`.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.state.is_deleted()
    }

    /// Returns true in `Rejected`.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        self.state.is_rejected()
    }

    /// Returns true if the broker refused the pending cancellation.
    #[must_use]
    pub const fn is_cancel_rejected(&self) -> bool {
        self.cancel_rejected
    }

    /// Operator-facing label, suffixed with " (CR)" after a cancel refusal.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.cancel_rejected {
            format!("{} (CR)", self.state.label())
        } else {
            self.state.label().to_string()
        }
    }

    /// Actions an operator may fire from the current state.
    ///
    /// `RejectCancel` is never listed, nor is the ignored re-allocation.
    #[must_use]
    pub fn allowed_actions(&self) -> Vec<LegAction> {
        LegAction::ALL
            .into_iter()
            .filter(|action| action.is_operator_action())
            .filter(|action| matches!(effect(self.state, *action), Some(LegEffect::MoveTo(_))))
            .collect()
    }

    /// Apply a broker action.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the action is not valid from the
    /// current state; the leg is left unchanged.
    pub fn apply(&mut self, action: LegAction) -> Result<LegOutcome, OrderError> {
        let Some(effect) = effect(self.state, action) else {
            return Err(OrderError::invalid_transition(
                format!("leg {}", self.broker_id),
                self.state,
                action,
            ));
        };

        let outcome = match effect {
            LegEffect::MoveTo(to) => {
                if to.is_deleted() {
                    self.cancel_rejected = false;
                }
                self.transition_to(to)
            }
            LegEffect::RefuseCancel => {
                self.cancel_rejected = true;
                LegOutcome::CancelRefused
            }
            LegEffect::Ignore => LegOutcome::Ignored,
        };

        tracing::debug!(
            broker_id = %self.broker_id,
            %action,
            state = %self.state,
            cancel_rejected = self.cancel_rejected,
            "Leg action applied"
        );

        Ok(outcome)
    }

    /// Broker accepts the order.
    ///
    /// # Errors
    ///
    /// Returns error unless the leg is `NotAccepted`.
    pub fn accept(&mut self) -> Result<LegOutcome, OrderError> {
        self.apply(LegAction::Accept)
    }

    /// Broker rejects the order.
    ///
    /// # Errors
    ///
    /// Returns error unless the leg is `NotAccepted`.
    pub fn reject(&mut self) -> Result<LegOutcome, OrderError> {
        self.apply(LegAction::Reject)
    }

    /// Broker allocates the order; ignored if already allocated.
    ///
    /// # Errors
    ///
    /// Returns error unless the leg is accepted.
    pub fn allocate(&mut self) -> Result<LegOutcome, OrderError> {
        self.apply(LegAction::Allocate)
    }

    /// Broker deletes the order, clearing any cancel refusal.
    ///
    /// # Errors
    ///
    /// Returns error unless the leg is accepted.
    pub fn delete(&mut self) -> Result<LegOutcome, OrderError> {
        self.apply(LegAction::Delete)
    }

    /// Broker refuses the pending cancellation.
    ///
    /// # Errors
    ///
    /// Returns error unless the leg is accepted.
    pub fn reject_cancel(&mut self) -> Result<LegOutcome, OrderError> {
        self.apply(LegAction::RejectCancel)
    }

    fn transition_to(&mut self, to: LegState) -> LegOutcome {
        let from = std::mem::replace(&mut self.state, to);
        LegOutcome::Transitioned { from, to }
    }
}

/// What an action does to a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegEffect {
    MoveTo(LegState),
    RefuseCancel,
    Ignore,
}

/// Leg action table. `None` means the action is refused.
const fn effect(state: LegState, action: LegAction) -> Option<LegEffect> {
    match (state, action) {
        (LegState::NotAccepted, LegAction::Accept) => {
            Some(LegEffect::MoveTo(LegState::PendingAllocation))
        }
        (LegState::NotAccepted, LegAction::Reject) => Some(LegEffect::MoveTo(LegState::Rejected)),
        (LegState::PendingAllocation, LegAction::Allocate) => {
            Some(LegEffect::MoveTo(LegState::Allocated))
        }
        (LegState::Allocated, LegAction::Allocate) => Some(LegEffect::Ignore),
        (LegState::PendingAllocation | LegState::Allocated, LegAction::Delete) => {
            Some(LegEffect::MoveTo(LegState::Deleted))
        }
        (LegState::PendingAllocation | LegState::Allocated, LegAction::RejectCancel) => {
            Some(LegEffect::RefuseCancel)
        }
        (
            LegState::NotAccepted,
            LegAction::Allocate | LegAction::Delete | LegAction::RejectCancel,
        )
        | (LegState::PendingAllocation | LegState::Allocated, LegAction::Accept | LegAction::Reject)
        | (LegState::Rejected | LegState::Deleted, _) => None,
    }
}
