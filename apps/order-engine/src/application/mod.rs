//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for publishing events to external consumers
//! - **Use Cases**: Command handling for one order
//! - **Services**: The operator activity feed
//! - **DTOs**: Read models for presentation layers

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use services::*;
pub use use_cases::*;
