//! Operator activity feed.
//!
//! Turns order events into the short messages shown to buy-side and
//! sell-side operators.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::events::{OrderEvent, OrderEventKind};
use crate::domain::shared::Timestamp;

/// Audience of an activity message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityChannel {
    /// Buy-side operator.
    BuySide,
    /// Sell-side (broker) operators.
    SellSide,
}

/// One line of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Audience.
    pub channel: ActivityChannel,
    /// Operator-facing message.
    pub message: String,
    /// When the underlying event occurred.
    pub occurred_at: Timestamp,
}

/// Maps events to activity messages.
pub struct ActivityFeed;

impl ActivityFeed {
    /// Message for an event kind, if operators are told about it.
    #[must_use]
    pub const fn describe(kind: &OrderEventKind) -> Option<(ActivityChannel, &'static str)> {
        match kind {
            OrderEventKind::FirstAccepted { .. } => {
                Some((ActivityChannel::BuySide, "Order Accepted"))
            }
            OrderEventKind::AllRejected => Some((ActivityChannel::BuySide, "Order Rejected")),
            OrderEventKind::AllCancelled => Some((ActivityChannel::BuySide, "Order Cancelled")),
            OrderEventKind::CancelRejected => {
                Some((ActivityChannel::BuySide, "Cancellation Rejected"))
            }
            OrderEventKind::EnteredNegotiating => {
                Some((ActivityChannel::SellSide, "New buy side order"))
            }
            OrderEventKind::BuySideCancelInitiated => {
                Some((ActivityChannel::SellSide, "Order was cancelled"))
            }
            OrderEventKind::LegChanged { .. }
            | OrderEventKind::StateChanged { .. }
            | OrderEventKind::FirstAllocated { .. }
            | OrderEventKind::CancelConfirmed
            | OrderEventKind::CancelRejectedNotified
            | OrderEventKind::OrderCancelConfirmed => None,
        }
    }

    /// Activity entries for a batch of events, in event order.
    #[must_use]
    pub fn entries(events: &[OrderEvent]) -> Vec<ActivityEntry> {
        events
            .iter()
            .filter_map(|event| {
                Self::describe(&event.kind).map(|(channel, message)| ActivityEntry {
                    channel,
                    message: message.to_string(),
                    occurred_at: event.occurred_at,
                })
            })
            .collect()
    }

    /// Entry shown to the operator whose action was refused.
    #[must_use]
    pub fn rejection(channel: ActivityChannel, action: &str) -> ActivityEntry {
        ActivityEntry {
            channel,
            message: format!("Action {action} is not allowed"),
            occurred_at: Timestamp::now(),
        }
    }
}
