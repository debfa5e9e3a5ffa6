//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod order_desk;

pub use order_desk::{OrderCommand, OrderDeskUseCase};
