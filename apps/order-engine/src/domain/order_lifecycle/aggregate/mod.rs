//! Order Lifecycle Aggregates
//!
//! `OrderEngine` is the root; it exclusively owns one `BuySide` and one
//! `SellSide`, which in turn owns one `Leg` per broker.

mod buy_side;
mod leg;
mod order_engine;
mod sell_side;

pub use buy_side::BuySide;
pub use leg::{Leg, LegOutcome};
pub use order_engine::OrderEngine;
pub use sell_side::{LegTally, SellSide};
