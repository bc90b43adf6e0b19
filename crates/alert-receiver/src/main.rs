//! Alert Receiver - Main Entry Point
//!
//! Usage: `alert-receiver [CONFIG_FILE]`

use alert_receiver::{init_logging, run_server, ReceiverConfig};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ReceiverConfig::load(config_path.as_deref())
        .context("failed to load alert receiver configuration")?;

    init_logging(&config).context("failed to install tracing subscriber")?;

    info!("=== Alert Receiver v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(&config).await?;

    Ok(())
}
