//! Sell-side leg pool.
//!
//! Owns one [`Leg`] per broker and derives the collective outcome of the
//! order from the joint state of all legs. Aggregate outcomes are recomputed
//! from scratch after every leg change; only `FirstAccepted` and
//! `FirstAllocated` are edge-triggered.

use serde::{Deserialize, Serialize};

use super::Leg;
use crate::domain::order_lifecycle::errors::OrderError;
use crate::domain::order_lifecycle::events::SellSideEvent;
use crate::domain::order_lifecycle::value_objects::LegAction;
use crate::domain::shared::BrokerId;

/// Leg counts over the whole pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegTally {
    /// Total legs in the pool.
    pub leg_count: usize,
    /// Legs in an accepted sub-state.
    pub accepted: usize,
    /// Rejected legs.
    pub rejected: usize,
    /// Deleted legs.
    pub deleted: usize,
    /// Legs whose broker refused the cancellation.
    pub cancel_rejected: usize,
}

impl LegTally {
    /// Count legs by outcome.
    #[must_use]
    pub fn from_legs(legs: &[Leg]) -> Self {
        legs.iter().fold(
            Self {
                leg_count: legs.len(),
                ..Self::default()
            },
            |mut tally, leg| {
                tally.accepted += usize::from(leg.is_accepted());
                tally.rejected += usize::from(leg.is_rejected());
                tally.deleted += usize::from(leg.is_deleted());
                tally.cancel_rejected += usize::from(leg.is_cancel_rejected());
                tally
            },
        )
    }

    /// Every broker rejected.
    #[must_use]
    pub const fn all_rejected(&self) -> bool {
        self.rejected == self.leg_count
    }

    /// Every leg is rejected or deleted.
    #[must_use]
    pub const fn all_inactive(&self) -> bool {
        self.rejected + self.deleted == self.leg_count
    }

    /// At least one cancel refusal, and every other leg is inactive.
    #[must_use]
    pub const fn all_cancel_rejected_or_inactive(&self) -> bool {
        self.cancel_rejected > 0
            && self.cancel_rejected + self.rejected + self.deleted == self.leg_count
    }
}

/// Fixed pool of broker legs for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellSide {
    legs: Vec<Leg>,
    buy_side_cancelled: bool,
    first_accepted_raised: bool,
    first_allocated_raised: bool,
}

impl SellSide {
    /// Create a pool with brokers `0..broker_count`.
    #[must_use]
    pub fn new(broker_count: u32) -> Self {
        Self {
            legs: (0..broker_count).map(|id| Leg::new(BrokerId::new(id))).collect(),
            buy_side_cancelled: false,
            first_accepted_raised: false,
            first_allocated_raised: false,
        }
    }

    /// Get the legs in broker order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Get the number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns true if the pool has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Look up a leg.
    ///
    /// # Errors
    ///
    /// Returns `BrokerNotFound` for a broker outside the pool.
    pub fn leg(&self, broker_id: BrokerId) -> Result<&Leg, OrderError> {
        self.legs
            .iter()
            .find(|leg| leg.broker_id() == broker_id)
            .ok_or(OrderError::BrokerNotFound { broker_id })
    }

    /// Returns true if a buy-side cancellation is in flight.
    #[must_use]
    pub const fn buy_side_cancelled(&self) -> bool {
        self.buy_side_cancelled
    }

    /// Current leg counts.
    #[must_use]
    pub fn tally(&self) -> LegTally {
        LegTally::from_legs(&self.legs)
    }

    /// Returns true if any leg was allocated.
    #[must_use]
    pub fn has_allocations(&self) -> bool {
        self.legs.iter().any(Leg::is_allocated)
    }

    /// Mark the buy side as cancelled.
    pub fn cancel(&mut self) {
        self.buy_side_cancelled = true;
        tracing::debug!("Sell side notified of buy-side cancellation");
    }

    /// Broker accepts its leg.
    ///
    /// # Errors
    ///
    /// Returns error if the broker is unknown or the leg cannot accept.
    pub fn accept(&mut self, broker_id: BrokerId) -> Result<Vec<SellSideEvent>, OrderError> {
        self.apply(broker_id, LegAction::Accept)
    }

    /// Broker allocates its leg.
    ///
    /// # Errors
    ///
    /// Returns error if the broker is unknown or the leg is not accepted.
    pub fn allocate(&mut self, broker_id: BrokerId) -> Result<Vec<SellSideEvent>, OrderError> {
        self.apply(broker_id, LegAction::Allocate)
    }

    /// Broker rejects its leg.
    ///
    /// # Errors
    ///
    /// Returns error if the broker is unknown or the leg was already answered.
    pub fn reject(&mut self, broker_id: BrokerId) -> Result<Vec<SellSideEvent>, OrderError> {
        self.apply(broker_id, LegAction::Reject)
    }

    /// Broker deletes its leg.
    ///
    /// # Errors
    ///
    /// Returns error if the broker is unknown or the leg is not accepted.
    pub fn delete(&mut self, broker_id: BrokerId) -> Result<Vec<SellSideEvent>, OrderError> {
        self.apply(broker_id, LegAction::Delete)
    }

    /// Broker refuses the cancellation.
    ///
    /// # Errors
    ///
    /// Returns error if the broker is unknown or the leg is not accepted.
    pub fn reject_cancel(&mut self, broker_id: BrokerId) -> Result<Vec<SellSideEvent>, OrderError> {
        self.apply(broker_id, LegAction::RejectCancel)
    }

    /// Apply a broker action and derive the resulting events.
    ///
    /// # Errors
    ///
    /// Returns `BrokerNotFound` for an unknown broker and `InvalidTransition`
    /// if the leg rejects the action. The pool is unchanged on error.
    pub fn apply(
        &mut self,
        broker_id: BrokerId,
        action: LegAction,
    ) -> Result<Vec<SellSideEvent>, OrderError> {
        let index = self
            .legs
            .iter()
            .position(|leg| leg.broker_id() == broker_id)
            .ok_or(OrderError::BrokerNotFound { broker_id })?;

        let none_accepted_before = !self.legs.iter().any(Leg::is_accepted);
        let none_allocated_before = !self.has_allocations();

        let leg = &mut self.legs[index];
        if !leg.apply(action)?.is_change() {
            return Ok(Vec::new());
        }
        let (state, cancel_rejected) = (leg.state(), leg.is_cancel_rejected());

        let mut events = vec![SellSideEvent::LegChanged {
            broker_id,
            state,
            cancel_rejected,
        }];

        if none_accepted_before && state.is_accepted() && !self.first_accepted_raised {
            self.first_accepted_raised = true;
            events.push(SellSideEvent::FirstAccepted { broker_id });
        }

        if none_allocated_before
            && state.is_allocated()
            && !self.buy_side_cancelled
            && !self.first_allocated_raised
        {
            self.first_allocated_raised = true;
            events.push(SellSideEvent::FirstAllocated { broker_id });
        }

        events.extend(self.evaluate());
        Ok(events)
    }

    /// Select the aggregate outcome for the current leg states.
    fn evaluate(&mut self) -> Option<SellSideEvent> {
        let tally = self.tally();

        let event = if self.buy_side_cancelled {
            if tally.all_inactive() {
                Some(SellSideEvent::CancelConfirmed)
            } else if tally.all_cancel_rejected_or_inactive() {
                self.buy_side_cancelled = false;
                Some(SellSideEvent::CancelRejected)
            } else {
                None
            }
        } else if tally.all_rejected() {
            Some(SellSideEvent::AllRejected)
        } else if tally.all_inactive() {
            Some(SellSideEvent::AllCancelled)
        } else if tally.all_cancel_rejected_or_inactive() {
            Some(SellSideEvent::CancelRejected)
        } else {
            None
        };

        if let Some(event) = &event {
            tracing::debug!(?tally, ?event, "Sell side outcome");
        }

        event
    }
}
