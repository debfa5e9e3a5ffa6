//! Data Transfer Objects (DTOs)
//!
//! Read models handed to presentation layers.

mod order_snapshot_dto;

pub use order_snapshot_dto::{IntakeItemDto, LegDto, OrderSnapshotDto};
