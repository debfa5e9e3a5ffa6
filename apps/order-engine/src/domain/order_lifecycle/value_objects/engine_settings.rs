//! Construction parameters of an order engine.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::errors::OrderError;

/// Default number of broker legs per order.
pub const DEFAULT_BROKER_COUNT: u32 = 3;

/// Default number of intake items required before negotiation.
pub const DEFAULT_INTAKE_THRESHOLD: usize = 2;

/// Pool size and intake threshold for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Number of broker legs, fixed for the order's life.
    pub broker_count: u32,
    /// Intake items required before the legs go live.
    pub intake_threshold: usize,
}

impl EngineSettings {
    /// Create settings with explicit values.
    #[must_use]
    pub const fn new(broker_count: u32, intake_threshold: usize) -> Self {
        Self {
            broker_count,
            intake_threshold,
        }
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns error if the broker pool or the intake threshold is zero.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.broker_count == 0 {
            return Err(OrderError::InvalidSettings {
                field: "broker_count".to_string(),
                message: "at least one broker leg is required".to_string(),
            });
        }
        if self.intake_threshold == 0 {
            return Err(OrderError::InvalidSettings {
                field: "intake_threshold".to_string(),
                message: "at least one intake item is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new(DEFAULT_BROKER_COUNT, DEFAULT_INTAKE_THRESHOLD)
    }
}
