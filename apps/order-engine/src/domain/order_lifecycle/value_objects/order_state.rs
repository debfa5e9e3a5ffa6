//! Top-level order phase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the order as driven by the order engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Buy side is still collecting intake items.
    Intake,
    /// Broker legs are live and responding.
    Negotiating,
    /// Buy side requested cancellation; brokers may still refuse.
    Cancelling,
    /// Order lifecycle finished. **Terminal.**
    Closed,
}

impl OrderState {
    /// Returns true if the order is closed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns true if broker leg actions are routed in this phase.
    #[must_use]
    pub const fn routes_leg_actions(&self) -> bool {
        matches!(self, Self::Negotiating | Self::Cancelling)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intake => write!(f, "INTAKE"),
            Self::Negotiating => write!(f, "NEGOTIATING"),
            Self::Cancelling => write!(f, "CANCELLING"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}
