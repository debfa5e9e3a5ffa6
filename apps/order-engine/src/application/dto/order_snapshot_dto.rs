//! Order snapshot DTOs

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::aggregate::{Leg, OrderEngine};
use crate::domain::order_lifecycle::value_objects::{LegAction, LegState, OrderState, OrderTrigger};
use crate::domain::shared::{BrokerId, Timestamp};

/// DTO representing one broker leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegDto {
    /// Broker ID.
    pub broker_id: BrokerId,
    /// Broker display name.
    pub broker_name: String,
    /// Leg state.
    pub state: LegState,
    /// Operator-facing label.
    pub label: String,
    /// Broker refused the cancellation.
    pub cancel_rejected: bool,
    /// Operator actions currently offered.
    pub allowed_actions: Vec<LegAction>,
}

impl LegDto {
    /// Create from a domain leg.
    #[must_use]
    pub fn from_leg(leg: &Leg, routes_actions: bool) -> Self {
        Self {
            broker_id: leg.broker_id(),
            broker_name: leg.broker_id().display_name(),
            state: leg.state(),
            label: leg.display_label(),
            cancel_rejected: leg.is_cancel_rejected(),
            allowed_actions: if routes_actions {
                leg.allowed_actions()
            } else {
                Vec::new()
            },
        }
    }
}

/// DTO for one intake item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeItemDto {
    /// Label.
    pub label: String,
    /// Added at.
    pub added_at: Timestamp,
}

/// Read model of an order engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshotDto {
    /// Order ID.
    pub order_id: String,
    /// Current phase.
    pub state: OrderState,
    /// Cancellation in flight.
    pub buy_side_cancelled: bool,
    /// Items required to complete intake.
    pub intake_threshold: usize,
    /// Items collected.
    pub intake_items: Vec<IntakeItemDto>,
    /// Legs in broker order.
    pub legs: Vec<LegDto>,
    /// Triggers permitted in the current phase.
    pub available_triggers: Vec<OrderTrigger>,
}

impl OrderSnapshotDto {
    /// Create from a domain engine.
    #[must_use]
    pub fn from_engine(engine: &OrderEngine) -> Self {
        let state = engine.current_state();
        let routes_actions = state.routes_leg_actions();

        Self {
            order_id: engine.order_id().to_string(),
            state,
            buy_side_cancelled: engine.buy_side_cancelled(),
            intake_threshold: engine.settings().intake_threshold,
            intake_items: engine
                .intake_items()
                .iter()
                .map(|item| IntakeItemDto {
                    label: item.label().to_string(),
                    added_at: item.added_at(),
                })
                .collect(),
            legs: engine
                .legs()
                .iter()
                .map(|leg| LegDto::from_leg(leg, routes_actions))
                .collect(),
            available_triggers: OrderTrigger::ALL
                .into_iter()
                .filter(|trigger| !trigger.is_internal() && engine.is_action_available(*trigger))
                .collect(),
        }
    }
}
