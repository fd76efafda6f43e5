mod bootstrap;
mod health;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use frontdesk_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use frontdesk_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions {
        config_path: std::env::var_os("FRONTDESK_CONFIG").map(PathBuf::from),
        ..LoadOptions::default()
    })?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;

    let archive_path =
        app.config.dispatch.archive.then(|| app.config.dispatch.archive_path.clone());
    health::spawn(&app.config.server.bind_address, app.config.server.health_check_port, archive_path)
        .await?;

    tracing::info!(
        event_name = "frontdesk.server.transport_mode",
        transport_mode = if app.session_runner.is_noop_transport() { "noop" } else { "live" },
        correlation_id = "bootstrap",
        tool_count = app.tools.len(),
        "voice session transport mode initialized"
    );

    app.session_runner.run().await?;

    tracing::info!(
        event_name = "frontdesk.server.started",
        correlation_id = "bootstrap",
        "frontdesk-server started"
    );
    wait_for_shutdown().await?;
    tracing::info!(
        event_name = "frontdesk.server.stopping",
        correlation_id = "shutdown",
        "frontdesk-server stopping"
    );

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
