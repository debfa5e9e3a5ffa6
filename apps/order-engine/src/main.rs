//! Order Engine Binary
//!
//! Replays the canonical order scenario against one engine and logs every
//! event: two intake items, three broker accepts, three deletes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: Path to the YAML config (default: config.yaml,
//!   built-in defaults when absent)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use order_engine::application::ports::BroadcastEventPublisher;
use order_engine::application::services::ActivityChannel;
use order_engine::application::use_cases::{OrderCommand, OrderDeskUseCase};
use order_engine::config::{Config, load_config};
use order_engine::observability::init_logging;
use tokio::sync::broadcast::error::TryRecvError;

fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_configuration()?;
    init_logging(&config.observability.logging).context("failed to initialize logging")?;

    let publisher = Arc::new(BroadcastEventPublisher::default());
    let mut events_rx = publisher.subscribe();
    tracing::debug!(
        subscribers = publisher.subscriber_count(),
        "Event subscriber attached"
    );

    let mut desk = OrderDeskUseCase::new(config.engine.to_settings(), Arc::clone(&publisher))
        .context("failed to create order engine")?;

    tracing::info!(
        order_id = %desk.engine().order_id(),
        brokers = config.engine.broker_count,
        intake_threshold = config.engine.intake_threshold,
        "Replaying order scenario"
    );

    for command in scenario(&desk) {
        if let Err(e) = desk.execute(command) {
            tracing::warn!(error = %e, "Scenario command refused");
        }
    }

    loop {
        match events_rx.try_recv() {
            Ok(event) => tracing::info!(
                sequence = event.sequence,
                event = event.event_type(),
                kind = ?event.kind,
                "Order event"
            ),
            Err(TryRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Event subscriber lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    for entry in desk.activity() {
        let channel = match entry.channel {
            ActivityChannel::BuySide => "buy side",
            ActivityChannel::SellSide => "sell side",
        };
        tracing::info!(channel, message = %entry.message, "Activity");
    }

    let snapshot = serde_json::to_string_pretty(&desk.snapshot())?;
    tracing::info!(state = %desk.engine().current_state(), "Final snapshot:\n{snapshot}");

    Ok(())
}

/// Intake up to the threshold, every broker accepts, every broker deletes.
fn scenario<P>(desk: &OrderDeskUseCase<P>) -> Vec<OrderCommand>
where
    P: order_engine::application::ports::EventPublisherPort,
{
    let engine = desk.engine();
    let intake = (1..=engine.settings().intake_threshold).map(|n| OrderCommand::AddIntakeItem {
        label: format!("Buy side step {n}"),
    });
    let accepts = engine.broker_ids().into_iter().map(OrderCommand::accept);
    let deletes = engine.broker_ids().into_iter().map(OrderCommand::delete);

    intake.chain(accepts).chain(deletes).collect()
}

fn load_configuration() -> anyhow::Result<Config> {
    let path = std::env::var("ORDER_ENGINE_CONFIG").ok();
    match path.as_deref() {
        Some(path) => load_config(Some(path)).with_context(|| format!("loading {path}")),
        None if Path::new("config.yaml").exists() => {
            load_config(None).context("loading config.yaml")
        }
        None => Ok(Config::default()),
    }
}

fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
