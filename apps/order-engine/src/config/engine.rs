//! Order engine configuration.

use serde::{Deserialize, Serialize};

use crate::domain::order_lifecycle::{
    DEFAULT_BROKER_COUNT, DEFAULT_INTAKE_THRESHOLD, EngineSettings,
};

/// Parameters for every order engine the process creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of broker legs per order.
    #[serde(default = "default_broker_count")]
    pub broker_count: u32,
    /// Intake items required before negotiation starts.
    #[serde(default = "default_intake_threshold")]
    pub intake_threshold: usize,
}

impl EngineConfig {
    /// Convert to domain engine settings.
    #[must_use]
    pub const fn to_settings(&self) -> EngineSettings {
        EngineSettings::new(self.broker_count, self.intake_threshold)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            broker_count: default_broker_count(),
            intake_threshold: default_intake_threshold(),
        }
    }
}

impl From<EngineConfig> for EngineSettings {
    fn from(config: EngineConfig) -> Self {
        config.to_settings()
    }
}

const fn default_broker_count() -> u32 {
    DEFAULT_BROKER_COUNT
}

const fn default_intake_threshold() -> usize {
    DEFAULT_INTAKE_THRESHOLD
}
