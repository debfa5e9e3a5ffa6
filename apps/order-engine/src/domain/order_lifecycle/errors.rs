//! Order lifecycle errors.

use thiserror::Error;

use crate::domain::shared::BrokerId;

/// Errors that can occur while driving an order.
///
/// No variant leaves partial state behind: every command validates before
/// it mutates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Trigger not permitted in the current state of the order or of a leg.
    #[error("Invalid transition for {entity}: {trigger} not permitted in state {state}")]
    InvalidTransition {
        /// Entity the trigger was fired at (e.g. "order", "leg 1").
        entity: String,
        /// Current state of the entity.
        state: String,
        /// Rejected trigger or action.
        trigger: String,
    },

    /// Leg-routed command referenced a broker outside the pool.
    #[error("Broker not found: {broker_id}")]
    BrokerNotFound {
        /// Unknown broker.
        broker_id: BrokerId,
    },

    /// Engine constructed with unusable parameters.
    #[error("Invalid engine setting '{field}': {message}")]
    InvalidSettings {
        /// Offending setting.
        field: String,
        /// Error message.
        message: String,
    },
}

impl OrderError {
    /// Build an `InvalidTransition` error.
    #[must_use]
    pub fn invalid_transition(
        entity: impl Into<String>,
        state: impl ToString,
        trigger: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            entity: entity.into(),
            state: state.to_string(),
            trigger: trigger.to_string(),
        }
    }

    /// Returns true for `InvalidTransition`.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}
