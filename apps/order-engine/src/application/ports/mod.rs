//! Application Ports (Driven)
//!
//! Interfaces the application uses to reach external consumers.

mod event_publisher_port;

pub use event_publisher_port::{
    BroadcastEventPublisher, DEFAULT_CHANNEL_CAPACITY, EventPublishError, EventPublisherPort,
    InMemoryEventPublisher, NoOpEventPublisher,
};
