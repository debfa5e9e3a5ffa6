// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Engine - Rust Core Library
//!
//! Lifecycle of one buy-side order negotiated across a fixed pool of
//! broker legs, including a cancellation protocol in which any broker may
//! refuse.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `order_lifecycle`: Leg machine, sell-side aggregation, order engine
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `EventPublisherPort` and its in-process adapters
//!   - `use_cases`: `OrderDesk`
//!   - `services`: Operator activity feed
//!   - `dto`: Order snapshot read model
//!
//! - **Config / Observability**: YAML configuration, logging, metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Configuration loading and validation.
pub mod config;

/// Logging and metrics.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::{
    BroadcastEventPublisher, EventPublisherPort, InMemoryEventPublisher, NoOpEventPublisher,
    OrderCommand, OrderDeskUseCase, OrderSnapshotDto,
};
pub use domain::order_lifecycle::{
    EngineSettings, IntakeItem, LegAction, LegState, OrderError, OrderEngine, OrderEvent,
    OrderEventKind, OrderState, OrderTrigger,
};
pub use domain::shared::{BrokerId, OrderId, Timestamp};
