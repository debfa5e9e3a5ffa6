//! Event Publisher Port (Driven Port)
//!
//! Interface for fanning order events out to external consumers.

use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::domain::order_lifecycle::events::OrderEvent;

/// Default capacity of the outbound broadcast channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1_024;

/// Event publishing error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventPublishError {
    /// Publishing failed.
    #[error("Event publish failed: {message}")]
    PublishFailed { message: String },
}

/// Port for publishing order events.
///
/// Called synchronously after each command; a failure never rolls back the
/// command that produced the events.
pub trait EventPublisherPort: Send + Sync {
    /// Publish order events in order.
    fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError>;

    /// Publish a single order event.
    fn publish_order_event(&self, event: OrderEvent) -> Result<(), EventPublishError> {
        self.publish_order_events(vec![event])
    }
}

/// No-op event publisher for testing.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl EventPublisherPort for NoOpEventPublisher {
    fn publish_order_events(&self, _events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        Ok(())
    }
}

/// Publishes onto a single `tokio` broadcast channel.
///
/// Events sent while nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<OrderEvent>,
}

impl BroadcastEventPublisher {
    /// Create a publisher with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to subsequently published events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl EventPublisherPort for BroadcastEventPublisher {
    fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        for event in events {
            if self.sender.send(event).is_err() {
                tracing::trace!("No subscribers for order events");
                break;
            }
        }
        Ok(())
    }
}

/// Records every published event in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<OrderEvent>>,
}

impl InMemoryEventPublisher {
    /// Create an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of everything published so far.
    #[must_use]
    pub fn events(&self) -> Vec<OrderEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the event type names published so far.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(OrderEvent::event_type)
            .collect()
    }
}

impl EventPublisherPort for InMemoryEventPublisher {
    fn publish_order_events(&self, events: Vec<OrderEvent>) -> Result<(), EventPublishError> {
        self.events
            .lock()
            .map_err(|e| EventPublishError::PublishFailed {
                message: e.to_string(),
            })?
            .extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_lifecycle::events::OrderEventKind;
    use crate::domain::shared::{OrderId, Timestamp};

    fn event(sequence: u64) -> OrderEvent {
        OrderEvent {
            order_id: OrderId::new("order-1"),
            sequence,
            kind: OrderEventKind::EnteredNegotiating,
            occurred_at: Timestamp::now(),
        }
    }

    #[test]
    fn no_op_publisher_succeeds() {
        let publisher = NoOpEventPublisher;
        assert!(publisher.publish_order_event(event(1)).is_ok());
    }

    #[test]
    fn broadcast_without_subscribers_succeeds() {
        let publisher = BroadcastEventPublisher::default();
        assert_eq!(publisher.subscriber_count(), 0);
        assert!(publisher.publish_order_events(vec![event(1), event(2)]).is_ok());
    }

    #[test]
    fn broadcast_delivers_in_order() {
        let publisher = BroadcastEventPublisher::new(8);
        let mut rx = publisher.subscribe();

        publisher
            .publish_order_events(vec![event(1), event(2)])
            .unwrap();

        assert_eq!(rx.try_recv().unwrap().sequence, 1);
        assert_eq!(rx.try_recv().unwrap().sequence, 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn in_memory_publisher_records() {
        let publisher = InMemoryEventPublisher::new();
        publisher.publish_order_events(vec![event(1)]).unwrap();
        publisher.publish_order_event(event(2)).unwrap();

        let events = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(publisher.event_types(), vec!["ENTERED_NEGOTIATING"; 2]);
    }
}
