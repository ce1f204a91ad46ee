//! x0xmd - machine-readable discovery surface for the x0x daemon

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use x0xmd::{artifacts, config::Args, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("x0xmd={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  x0xmd - x0x discovery surface");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Public host: {}", args.public_host);
    info!("Installer source: {}", args.install_script_url);
    info!("Machine endpoints: {}", artifacts::MACHINE_ENDPOINTS.len());
    info!("======================================");

    // Validates the canonical model; a drifted model must not serve.
    let state = match server::AppState::new(args) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Canonical model validation failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
