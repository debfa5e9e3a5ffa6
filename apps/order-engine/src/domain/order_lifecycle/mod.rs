//! Order Lifecycle Bounded Context
//!
//! Drives one order from buy-side intake through negotiation with a fixed
//! pool of brokers, including a cancellation protocol in which any broker
//! may refuse.
//!
//! # Key Concepts
//!
//! - **Leg**: one broker's response lifecycle
//! - **Sell Side**: derives collective outcomes from the joint leg states
//! - **Order Engine**: four-phase orchestrator returning ordered domain events

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregate::{BuySide, Leg, LegOutcome, LegTally, OrderEngine, SellSide};
pub use errors::OrderError;
pub use events::{OrderEvent, OrderEventKind, SellSideEvent};
pub use services::OrderStateMachine;
pub use value_objects::{
    DEFAULT_BROKER_COUNT, DEFAULT_INTAKE_THRESHOLD, EngineSettings, IntakeItem, LegAction,
    LegState, OrderState, OrderTrigger,
};
