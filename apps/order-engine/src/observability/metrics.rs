//! Metrics for the order engine.
//!
//! Recorded through the `metrics` facade. The library installs no exporter;
//! without one every call is a no-op.

use metrics::{counter, histogram};

use crate::domain::order_lifecycle::OrderState;

// ============================================================================
// Command Metrics
// ============================================================================

/// Record a command applied to an order.
///
/// # Arguments
///
/// * `command` - Command name (e.g., "`add_intake_item`", "`broker_accept`")
/// * `outcome` - "applied" or "rejected"
/// * `latency_seconds` - Time spent applying the command and publishing
pub fn record_command(command: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "order_commands_total",
        "command" => command.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "order_command_duration_seconds",
        "command" => command.to_string()
    )
    .record(latency_seconds);
}

// ============================================================================
// Event Metrics
// ============================================================================

/// Record a domain event.
pub fn record_event(event_type: &str) {
    counter!("order_events_total", "event" => event_type.to_string()).increment(1);
}

/// Record a top-level phase transition.
pub fn record_state_transition(to: OrderState) {
    counter!("order_state_transitions_total", "to" => to.to_string()).increment(1);
}

/// Record a failed publish of order events.
pub fn record_publish_failure() {
    counter!("order_event_publish_failures_total").increment(1);
}
