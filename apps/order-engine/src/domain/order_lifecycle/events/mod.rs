//! Domain events for the order lifecycle.
//!
//! Every command returns the ordered list of events it caused. Sell-side
//! events come first, followed by any phase-specific notification and
//! finally `StateChanged`.

use serde::{Deserialize, Serialize};

use super::value_objects::{LegState, OrderState};
use crate::domain::shared::{BrokerId, OrderId, Timestamp};

/// Events raised by the sell-side leg pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellSideEvent {
    /// A leg changed state or refused the cancellation.
    LegChanged {
        /// Broker owning the leg.
        broker_id: BrokerId,
        /// Leg state after the action.
        state: LegState,
        /// Cancel-rejected flag after the action.
        cancel_rejected: bool,
    },
    /// First broker accepted the order.
    FirstAccepted {
        /// Broker that accepted.
        broker_id: BrokerId,
    },
    /// First broker allocated the order.
    FirstAllocated {
        /// Broker that allocated.
        broker_id: BrokerId,
    },
    /// Every broker rejected the order.
    AllRejected,
    /// Every leg is rejected or deleted without a buy-side cancellation.
    AllCancelled,
    /// Every still-active broker refused the cancellation.
    CancelRejected,
    /// Every leg is rejected or deleted after a buy-side cancellation.
    CancelConfirmed,
}

/// Kind of event raised by the order engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventKind {
    /// A leg changed state or refused the cancellation.
    LegChanged {
        /// Broker owning the leg.
        broker_id: BrokerId,
        /// Leg state after the action.
        state: LegState,
        /// Cancel-rejected flag after the action.
        cancel_rejected: bool,
    },
    /// Top-level phase changed.
    StateChanged {
        /// Previous phase.
        from: OrderState,
        /// New phase.
        to: OrderState,
    },
    /// Intake completed; the broker legs are live.
    EnteredNegotiating,
    /// First broker accepted the order.
    FirstAccepted {
        /// Broker that accepted.
        broker_id: BrokerId,
    },
    /// First broker allocated the order.
    FirstAllocated {
        /// Broker that allocated.
        broker_id: BrokerId,
    },
    /// Every broker rejected the order.
    AllRejected,
    /// Every leg went inactive without a cancellation request.
    AllCancelled,
    /// Every still-active broker refused the cancellation.
    CancelRejected,
    /// Every leg went inactive after a cancellation request.
    CancelConfirmed,
    /// Buy side requested cancellation; legs were notified.
    BuySideCancelInitiated,
    /// Cancellation abandoned; the order is negotiating again.
    CancelRejectedNotified,
    /// Order closed through a confirmed cancellation.
    OrderCancelConfirmed,
}

impl OrderEventKind {
    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::LegChanged { .. } => "LEG_CHANGED",
            Self::StateChanged { .. } => "STATE_CHANGED",
            Self::EnteredNegotiating => "ENTERED_NEGOTIATING",
            Self::FirstAccepted { .. } => "FIRST_ACCEPTED",
            Self::FirstAllocated { .. } => "FIRST_ALLOCATED",
            Self::AllRejected => "ALL_REJECTED",
            Self::AllCancelled => "ALL_CANCELLED",
            Self::CancelRejected => "CANCEL_REJECTED",
            Self::CancelConfirmed => "CANCEL_CONFIRMED",
            Self::BuySideCancelInitiated => "BUY_SIDE_CANCEL_INITIATED",
            Self::CancelRejectedNotified => "CANCEL_REJECTED_NOTIFIED",
            Self::OrderCancelConfirmed => "ORDER_CANCEL_CONFIRMED",
        }
    }
}

impl From<SellSideEvent> for OrderEventKind {
    fn from(event: SellSideEvent) -> Self {
        match event {
            SellSideEvent::LegChanged {
                broker_id,
                state,
                cancel_rejected,
            } => Self::LegChanged {
                broker_id,
                state,
                cancel_rejected,
            },
            SellSideEvent::FirstAccepted { broker_id } => Self::FirstAccepted { broker_id },
            SellSideEvent::FirstAllocated { broker_id } => Self::FirstAllocated { broker_id },
            SellSideEvent::AllRejected => Self::AllRejected,
            SellSideEvent::AllCancelled => Self::AllCancelled,
            SellSideEvent::CancelRejected => Self::CancelRejected,
            SellSideEvent::CancelConfirmed => Self::CancelConfirmed,
        }
    }
}

/// Event envelope published for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// Order ID.
    pub order_id: OrderId,
    /// Position of the event in the order's event stream, starting at 1.
    pub sequence: u64,
    /// What happened.
    pub kind: OrderEventKind,
    /// When the event occurred.
    pub occurred_at: Timestamp,
}

impl OrderEvent {
    /// Get the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sell_side_event_converts_to_order_event_kind() {
        let kind: OrderEventKind = SellSideEvent::FirstAccepted {
            broker_id: BrokerId::new(1),
        }
        .into();
        assert_eq!(
            kind,
            OrderEventKind::FirstAccepted {
                broker_id: BrokerId::new(1)
            }
        );
        assert_eq!(kind.event_type(), "FIRST_ACCEPTED");
    }

    #[test]
    fn order_event_serde() {
        let event = OrderEvent {
            order_id: OrderId::new("ord-123"),
            sequence: 4,
            kind: OrderEventKind::StateChanged {
                from: OrderState::Negotiating,
                to: OrderState::Cancelling,
            },
            occurred_at: Timestamp::now(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("STATE_CHANGED"));
        assert!(json.contains("CANCELLING"));

        let parsed: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.event_type(), "STATE_CHANGED");
    }

    #[test]
    fn unit_variants_serialize_with_type_tag() {
        let json = serde_json::to_string(&OrderEventKind::CancelConfirmed).unwrap();
        assert_eq!(json, r#"{"type":"CANCEL_CONFIRMED"}"#);
    }
}
