//! Order Lifecycle Value Objects
//!
//! Immutable types for legs, order phases and engine construction.

mod engine_settings;
mod intake_item;
mod leg_action;
mod leg_state;
mod order_state;
mod order_trigger;

pub use engine_settings::{DEFAULT_BROKER_COUNT, DEFAULT_INTAKE_THRESHOLD, EngineSettings};
pub use intake_item::IntakeItem;
pub use leg_action::LegAction;
pub use leg_state::LegState;
pub use order_state::OrderState;
pub use order_trigger::OrderTrigger;
