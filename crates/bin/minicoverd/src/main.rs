//! # minicoverd — minicover daemon
//!
//! Composition root that wires the MQTT cover together and runs it.
//!
//! ## Responsibilities
//! - Load configuration (`minicover.toml`, env vars)
//! - Initialize logging
//! - Construct the change bus and the MQTT integration
//! - Log every cover change published on the bus
//! - Accept commands on stdin
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod console;

use tokio::io::BufReader;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use minicover_adapter_mqtt::MqttCoverIntegration;
use minicover_app::event_bus::InProcessChangeBus;
use minicover_app::ports::Integration;
use minicover_domain::notification::ChangeNotification;

use crate::config::Config;

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn log_change(change: &ChangeNotification) {
    tracing::info!(
        status = %change.status,
        position = ?change.position,
        tilt = ?change.tilt,
        assumed_state = change.assumed_state,
        cause = ?change.cause,
        "cover changed"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);

    // Change bus
    let bus = InProcessChangeBus::new(64);
    let mut changes = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => log_change(&change),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "change log lagging behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // MQTT
    tracing::info!(broker = %config.broker_addr(), cover = %config.cover.name, "starting minicoverd");
    let mut integration = MqttCoverIntegration::new(config.mqtt, config.cover, bus)?;
    let features = integration.settings().supported_features();
    tracing::info!(?features, "supported features");
    integration.setup().await?;

    // Console
    let console = tokio::spawn(console::run(
        integration.handle(),
        BufReader::new(tokio::io::stdin()),
    ));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    console.abort();
    integration.teardown().await?;

    Ok(())
}
