//! Order Engine Aggregate Root
//!
//! Sequences buy-side intake, sell-side negotiation and cancellation for a
//! single order. Owns the intake accumulator and the broker leg pool; every
//! command validates against the top-level transition table before it
//! touches either of them.

use serde::Serialize;

use super::{BuySide, Leg, LegTally, SellSide};
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::events::{OrderEvent, OrderEventKind, SellSideEvent};
use crate::domain::order_lifecycle::services::OrderStateMachine;
use crate::domain::order_lifecycle::value_objects::{
    EngineSettings, IntakeItem, LegAction, LegState, OrderState, OrderTrigger,
};
use crate::domain::shared::{BrokerId, OrderId, Timestamp};

/// Order Engine Aggregate Root.
///
/// One engine manages exactly one order. Commands return the ordered events
/// they caused; a failed command leaves the engine untouched.
#[derive(Debug, Clone, Serialize)]
pub struct OrderEngine {
    id: OrderId,
    state: OrderState,
    settings: EngineSettings,
    buy_side: BuySide,
    sell_side: SellSide,
    next_sequence: u64,
}

impl OrderEngine {
    /// Create an engine for a new order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the pool or the threshold is zero.
    pub fn new(settings: EngineSettings) -> Result<Self, OrderError> {
        Self::with_id(OrderId::generate(), settings)
    }

    /// Create an engine with a caller-supplied order ID.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the pool or the threshold is zero.
    pub fn with_id(id: OrderId, settings: EngineSettings) -> Result<Self, OrderError> {
        settings.validate()?;

        tracing::debug!(
            order_id = %id,
            broker_count = settings.broker_count,
            intake_threshold = settings.intake_threshold,
            "Order engine created"
        );

        Ok(Self {
            id,
            state: OrderState::Intake,
            settings,
            buy_side: BuySide::new(settings.intake_threshold),
            sell_side: SellSide::new(settings.broker_count),
            next_sequence: 1,
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Add an item to the buy side.
    ///
    /// Reaching the threshold moves the order to `Negotiating`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Intake`.
    pub fn add_intake_item(&mut self, item: IntakeItem) -> Result<Vec<OrderEvent>, OrderError> {
        self.check(OrderTrigger::AddIntakeItem)?;

        let mut pending = Vec::new();
        if self.buy_side.add(item)? {
            pending.push(OrderEventKind::EnteredNegotiating);
            self.advance(OrderTrigger::CompleteIntake, &mut pending);
        }

        Ok(self.stamp(pending))
    }

    /// Request cancellation of the order from every broker.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Negotiating`.
    pub fn cancel_buy_side(&mut self) -> Result<Vec<OrderEvent>, OrderError> {
        self.check(OrderTrigger::CancelBuySide)?;

        self.sell_side.cancel();
        let mut pending = vec![OrderEventKind::BuySideCancelInitiated];
        self.advance(OrderTrigger::CancelBuySide, &mut pending);

        Ok(self.stamp(pending))
    }

    /// Broker accepts the order.
    ///
    /// # Errors
    ///
    /// Returns error if the phase or the leg does not permit the action.
    pub fn broker_accept(&mut self, broker_id: BrokerId) -> Result<Vec<OrderEvent>, OrderError> {
        self.broker_action(broker_id, LegAction::Accept)
    }

    /// Broker allocates the order.
    ///
    /// # Errors
    ///
    /// Returns error if the phase or the leg does not permit the action.
    pub fn broker_allocate(&mut self, broker_id: BrokerId) -> Result<Vec<OrderEvent>, OrderError> {
        self.broker_action(broker_id, LegAction::Allocate)
    }

    /// Broker rejects the order.
    ///
    /// # Errors
    ///
    /// Returns error if the phase or the leg does not permit the action.
    pub fn broker_reject(&mut self, broker_id: BrokerId) -> Result<Vec<OrderEvent>, OrderError> {
        self.broker_action(broker_id, LegAction::Reject)
    }

    /// Broker deletes its leg.
    ///
    /// # Errors
    ///
    /// Returns error if the phase or the leg does not permit the action.
    pub fn broker_delete(&mut self, broker_id: BrokerId) -> Result<Vec<OrderEvent>, OrderError> {
        self.broker_action(broker_id, LegAction::Delete)
    }

    /// Broker refuses the cancellation.
    ///
    /// # Errors
    ///
    /// Returns error if the phase or the leg does not permit the action.
    pub fn broker_reject_cancel(
        &mut self,
        broker_id: BrokerId,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.broker_action(broker_id, LegAction::RejectCancel)
    }

    /// Route a leg action to the sell side and react to its outcome.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the phase does not route leg actions
    /// or the leg rejects the action, `BrokerNotFound` for an unknown broker.
    pub fn broker_action(
        &mut self,
        broker_id: BrokerId,
        action: LegAction,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.check(OrderTrigger::for_leg_action(action))?;

        let mut pending = Vec::new();
        for event in self.sell_side.apply(broker_id, action)? {
            pending.push(event.into());
            self.react(event, &mut pending);
        }

        Ok(self.stamp(pending))
    }

    /// Close the order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if the order is already closed.
    pub fn close(&mut self) -> Result<Vec<OrderEvent>, OrderError> {
        self.check(OrderTrigger::Close)?;

        let mut pending = Vec::new();
        self.advance(OrderTrigger::Close, &mut pending);

        Ok(self.stamp(pending))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.id
    }

    /// Get the current phase.
    #[must_use]
    pub const fn current_state(&self) -> OrderState {
        self.state
    }

    /// Get the construction settings.
    #[must_use]
    pub const fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Returns true if the trigger is permitted in the current phase.
    #[must_use]
    pub const fn is_action_available(&self, trigger: OrderTrigger) -> bool {
        OrderStateMachine::is_permitted(self.state, trigger)
    }

    /// Get the state of one leg.
    ///
    /// # Errors
    ///
    /// Returns `BrokerNotFound` for an unknown broker.
    pub fn leg_state(&self, broker_id: BrokerId) -> Result<LegState, OrderError> {
        self.sell_side.leg(broker_id).map(Leg::state)
    }

    /// Get the operator actions currently available on one leg.
    ///
    /// Empty while the order is not routing leg actions.
    ///
    /// # Errors
    ///
    /// Returns `BrokerNotFound` for an unknown broker.
    pub fn leg_allowed_actions(&self, broker_id: BrokerId) -> Result<Vec<LegAction>, OrderError> {
        let leg = self.sell_side.leg(broker_id)?;
        if self.state.routes_leg_actions() {
            Ok(leg.allowed_actions())
        } else {
            Ok(Vec::new())
        }
    }

    /// Get the number of intake items collected.
    #[must_use]
    pub fn intake_count(&self) -> usize {
        self.buy_side.count()
    }

    /// Get the intake items in insertion order.
    #[must_use]
    pub fn intake_items(&self) -> &[IntakeItem] {
        self.buy_side.items()
    }

    /// Get the legs in broker order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        self.sell_side.legs()
    }

    /// Get the broker IDs in pool order.
    #[must_use]
    pub fn broker_ids(&self) -> Vec<BrokerId> {
        self.sell_side.legs().iter().map(Leg::broker_id).collect()
    }

    /// Returns true while a buy-side cancellation is in flight.
    #[must_use]
    pub const fn buy_side_cancelled(&self) -> bool {
        self.sell_side.buy_side_cancelled()
    }

    /// Current leg counts.
    #[must_use]
    pub fn tally(&self) -> LegTally {
        self.sell_side.tally()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn check(&self, trigger: OrderTrigger) -> Result<(), OrderError> {
        OrderStateMachine::validate(self.state, trigger).map(|_| ())
    }

    /// Phase reaction to an aggregate outcome of the sell side.
    fn react(&mut self, event: SellSideEvent, pending: &mut Vec<OrderEventKind>) {
        match (self.state, event) {
            (OrderState::Negotiating | OrderState::Cancelling, SellSideEvent::AllRejected)
            | (OrderState::Negotiating, SellSideEvent::AllCancelled) => {
                self.advance(OrderTrigger::Close, pending);
            }
            (OrderState::Cancelling, SellSideEvent::CancelConfirmed) => {
                pending.push(OrderEventKind::OrderCancelConfirmed);
                self.advance(OrderTrigger::Close, pending);
            }
            (OrderState::Cancelling, SellSideEvent::CancelRejected) => {
                pending.push(OrderEventKind::CancelRejectedNotified);
                self.advance(OrderTrigger::UndoCancel, pending);
            }
            _ => {}
        }
    }

    /// Fire a trigger already known to be permitted and record the phase change.
    fn advance(&mut self, trigger: OrderTrigger, pending: &mut Vec<OrderEventKind>) {
        let from = self.state;
        let Some(to) = OrderStateMachine::next_state(from, trigger) else {
            tracing::warn!(order_id = %self.id, %from, %trigger, "Trigger not permitted");
            return;
        };
        if to == from {
            return;
        }

        self.state = to;
        tracing::info!(order_id = %self.id, %from, %to, %trigger, "Order state changed");
        pending.push(OrderEventKind::StateChanged { from, to });
    }

    fn stamp(&mut self, kinds: Vec<OrderEventKind>) -> Vec<OrderEvent> {
        let occurred_at = Timestamp::now();
        kinds
            .into_iter()
            .map(|kind| {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                OrderEvent {
                    order_id: self.id.clone(),
                    sequence,
                    kind,
                    occurred_at,
                }
            })
            .collect()
    }
}
