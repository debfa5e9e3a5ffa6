//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Aggregates**: Legs, the sell-side pool, the buy-side accumulator and the order engine
//! - **Value Objects**: Leg and order states, actions, triggers, settings
//! - **Domain Events**: Ordered records of every transition a command caused
//! - **Domain Services**: The top-level transition table
//!
//! # Bounded Contexts
//!
//! - [`order_lifecycle`]: Buy-side intake, broker negotiation and cancellation

pub mod order_lifecycle;
pub mod shared;
