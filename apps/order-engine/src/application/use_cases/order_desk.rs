//! Order Desk Use Case
//!
//! Applies operator commands to one order engine, publishes the resulting
//! events and keeps the operator activity feed.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::application::dto::OrderSnapshotDto;
use crate::application::ports::EventPublisherPort;
use crate::application::services::{ActivityChannel, ActivityEntry, ActivityFeed};
use crate::domain::order_lifecycle::aggregate::OrderEngine;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::events::{OrderEvent, OrderEventKind};
use crate::domain::order_lifecycle::value_objects::{
    EngineSettings, IntakeItem, LegAction, OrderTrigger,
};
use crate::domain::shared::BrokerId;
use crate::observability;

/// Command delivered to the order desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCommand {
    /// Add a buy-side intake item.
    AddIntakeItem {
        /// Item label.
        label: String,
    },
    /// Buy side requests cancellation.
    CancelBuySide,
    /// A broker acts on its leg.
    Broker {
        /// Acting broker.
        broker_id: BrokerId,
        /// Leg action.
        action: LegAction,
    },
    /// Close the order.
    Close,
}

impl OrderCommand {
    /// Broker accepts.
    #[must_use]
    pub const fn accept(broker_id: BrokerId) -> Self {
        Self::Broker {
            broker_id,
            action: LegAction::Accept,
        }
    }

    /// Broker allocates.
    #[must_use]
    pub const fn allocate(broker_id: BrokerId) -> Self {
        Self::Broker {
            broker_id,
            action: LegAction::Allocate,
        }
    }

    /// Broker rejects.
    #[must_use]
    pub const fn reject(broker_id: BrokerId) -> Self {
        Self::Broker {
            broker_id,
            action: LegAction::Reject,
        }
    }

    /// Broker deletes.
    #[must_use]
    pub const fn delete(broker_id: BrokerId) -> Self {
        Self::Broker {
            broker_id,
            action: LegAction::Delete,
        }
    }

    /// Broker refuses the cancellation.
    #[must_use]
    pub const fn reject_cancel(broker_id: BrokerId) -> Self {
        Self::Broker {
            broker_id,
            action: LegAction::RejectCancel,
        }
    }

    /// Top-level trigger the command fires.
    #[must_use]
    pub const fn trigger(&self) -> OrderTrigger {
        match self {
            Self::AddIntakeItem { .. } => OrderTrigger::AddIntakeItem,
            Self::CancelBuySide => OrderTrigger::CancelBuySide,
            Self::Broker { action, .. } => OrderTrigger::for_leg_action(*action),
            Self::Close => OrderTrigger::Close,
        }
    }

    /// Metric label for the command.
    #[must_use]
    pub const fn metric_name(&self) -> &'static str {
        match self {
            Self::AddIntakeItem { .. } => "add_intake_item",
            Self::CancelBuySide => "cancel_buy_side",
            Self::Broker { action, .. } => match action {
                LegAction::Accept => "broker_accept",
                LegAction::Reject => "broker_reject",
                LegAction::Allocate => "broker_allocate",
                LegAction::Delete => "broker_delete",
                LegAction::RejectCancel => "broker_reject_cancel",
            },
            Self::Close => "close",
        }
    }

    /// Action name shown to operators.
    #[must_use]
    pub const fn action_name(&self) -> &'static str {
        match self {
            Self::AddIntakeItem { .. } => "AddIntakeItem",
            Self::CancelBuySide => "CancelBuySide",
            Self::Broker { action, .. } => action.name(),
            Self::Close => "Close",
        }
    }

    /// Operator channel the command originates from.
    #[must_use]
    pub const fn channel(&self) -> ActivityChannel {
        match self {
            Self::Broker { .. } => ActivityChannel::SellSide,
            Self::AddIntakeItem { .. } | Self::CancelBuySide | Self::Close => {
                ActivityChannel::BuySide
            }
        }
    }
}

/// Use case driving one order.
pub struct OrderDeskUseCase<P>
where
    P: EventPublisherPort,
{
    engine: OrderEngine,
    event_publisher: Arc<P>,
    activity: Vec<ActivityEntry>,
}

impl<P> OrderDeskUseCase<P>
where
    P: EventPublisherPort,
{
    /// Create a desk for a new order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the settings are unusable.
    pub fn new(settings: EngineSettings, event_publisher: Arc<P>) -> Result<Self, OrderError> {
        Ok(Self::with_engine(OrderEngine::new(settings)?, event_publisher))
    }

    /// Create a desk around an existing engine.
    pub const fn with_engine(engine: OrderEngine, event_publisher: Arc<P>) -> Self {
        Self {
            engine,
            event_publisher,
            activity: Vec::new(),
        }
    }

    /// Apply a command and publish the events it caused.
    ///
    /// Publish failures are logged; they never undo the command.
    ///
    /// # Errors
    ///
    /// Returns the domain error if the engine refuses the command. The
    /// engine is unchanged in that case.
    pub fn execute(&mut self, command: OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        let started = Instant::now();
        let span = tracing::info_span!(
            "order.command",
            order_id = %self.engine.order_id(),
            command = command.metric_name()
        );
        let _guard = span.enter();

        let result = match &command {
            OrderCommand::AddIntakeItem { label } => {
                self.engine.add_intake_item(IntakeItem::new(label.as_str()))
            }
            OrderCommand::CancelBuySide => self.engine.cancel_buy_side(),
            OrderCommand::Broker { broker_id, action } => {
                self.engine.broker_action(*broker_id, *action)
            }
            OrderCommand::Close => self.engine.close(),
        };

        match result {
            Ok(events) => {
                for event in &events {
                    observability::record_event(event.event_type());
                    if let OrderEventKind::StateChanged { to, .. } = event.kind {
                        observability::record_state_transition(to);
                    }
                }
                self.activity.extend(ActivityFeed::entries(&events));

                if let Err(e) = self.event_publisher.publish_order_events(events.clone()) {
                    observability::record_publish_failure();
                    tracing::error!("Failed to publish order events: {}", e);
                }

                tracing::debug!(
                    events = events.len(),
                    state = %self.engine.current_state(),
                    "Command applied"
                );
                observability::record_command(
                    command.metric_name(),
                    "applied",
                    started.elapsed().as_secs_f64(),
                );
                Ok(events)
            }
            Err(e) => {
                tracing::warn!(
                    state = %self.engine.current_state(),
                    error = %e,
                    "Command rejected"
                );
                self.activity.push(ActivityFeed::rejection(
                    command.channel(),
                    command.action_name(),
                ));
                observability::record_command(
                    command.metric_name(),
                    "rejected",
                    started.elapsed().as_secs_f64(),
                );
                Err(e)
            }
        }
    }

    /// Read model of the order.
    #[must_use]
    pub fn snapshot(&self) -> OrderSnapshotDto {
        OrderSnapshotDto::from_engine(&self.engine)
    }

    /// Get the engine.
    #[must_use]
    pub const fn engine(&self) -> &OrderEngine {
        &self.engine
    }

    /// Get the activity feed in the order entries were produced.
    #[must_use]
    pub fn activity(&self) -> &[ActivityEntry] {
        &self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{EventPublishError, InMemoryEventPublisher};
    use crate::domain::order_lifecycle::value_objects::OrderState;
    use mockall::mock;

    mock! {
        pub Publisher {}

        impl EventPublisherPort for Publisher {
            fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;
        }
    }

    fn b(id: u32) -> BrokerId {
        BrokerId::new(id)
    }

    fn intake(label: &str) -> OrderCommand {
        OrderCommand::AddIntakeItem {
            label: label.to_string(),
        }
    }

    #[test]
    fn command_names() {
        assert_eq!(OrderCommand::accept(b(0)).metric_name(), "broker_accept");
        assert_eq!(
            OrderCommand::reject_cancel(b(0)).trigger(),
            OrderTrigger::BrokerRejectCancel
        );
        assert_eq!(OrderCommand::allocate(b(1)).action_name(), "Allocate");
        assert_eq!(OrderCommand::Close.channel(), ActivityChannel::BuySide);
        assert_eq!(OrderCommand::delete(b(1)).channel(), ActivityChannel::SellSide);
    }

    #[test]
    fn command_serde() {
        let json = serde_json::to_string(&OrderCommand::reject(b(2))).unwrap();
        assert!(json.contains("BROKER"));
        assert!(json.contains("REJECT"));
        let parsed: OrderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OrderCommand::reject(b(2)));
    }

    #[test]
    fn publishes_every_applied_command() {
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let mut desk =
            OrderDeskUseCase::new(EngineSettings::default(), Arc::clone(&publisher)).unwrap();

        desk.execute(intake("a")).unwrap();
        desk.execute(intake("b")).unwrap();
        desk.execute(OrderCommand::accept(b(0))).unwrap();

        assert_eq!(
            publisher.event_types(),
            vec![
                "ENTERED_NEGOTIATING",
                "STATE_CHANGED",
                "LEG_CHANGED",
                "FIRST_ACCEPTED",
            ]
        );
        let messages: Vec<_> = desk.activity().iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["New buy side order", "Order Accepted"]);
    }

    #[test]
    fn rejected_command_is_not_published() {
        let mut publisher = MockPublisher::new();
        publisher.expect_publish_order_events().times(0);

        let mut desk = OrderDeskUseCase::new(EngineSettings::default(), Arc::new(publisher)).unwrap();
        let err = desk.execute(OrderCommand::allocate(b(0))).unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(desk.engine().current_state(), OrderState::Intake);
        assert_eq!(desk.activity().len(), 1);
        assert_eq!(desk.activity()[0].message, "Action Allocate is not allowed");
        assert_eq!(desk.activity()[0].channel, ActivityChannel::SellSide);
    }

    #[test]
    fn publish_failure_does_not_undo_command() {
        let mut publisher = MockPublisher::new();
        publisher.expect_publish_order_events().returning(|_| {
            Err(EventPublishError::PublishFailed {
                message: "down".to_string(),
            })
        });

        let mut desk = OrderDeskUseCase::new(EngineSettings::new(3, 1), Arc::new(publisher)).unwrap();
        let events = desk.execute(intake("only")).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(desk.engine().current_state(), OrderState::Negotiating);
    }

    #[test]
    fn snapshot_tracks_engine() {
        let mut desk =
            OrderDeskUseCase::new(EngineSettings::new(2, 1), Arc::new(InMemoryEventPublisher::new()))
                .unwrap();
        desk.execute(intake("only")).unwrap();
        desk.execute(OrderCommand::reject(b(0))).unwrap();

        let snapshot = desk.snapshot();
        assert_eq!(snapshot.state, OrderState::Negotiating);
        assert_eq!(snapshot.legs.len(), 2);
        assert_eq!(snapshot.legs[0].label, "Rejected");
        assert!(snapshot.legs[0].allowed_actions.is_empty());
    }
}
