//! Observability module for logging and metrics.

mod logging;
mod metrics;

pub use self::logging::{LoggingError, build_env_filter, init_logging};
pub use self::metrics::{
    record_command, record_event, record_publish_failure, record_state_transition,
};
