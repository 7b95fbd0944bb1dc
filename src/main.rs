//! Wander main entry point
//!
//! This is the command-line interface for the Wander traffic generator.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wander::config::load_config;
use wander::crawler::wander;

/// Wander: a noisy web traffic generator
///
/// Wander browses the web at random from a set of root URLs, mimicking an
/// aimless human. It follows links to a bounded depth, pauses a random
/// interval between pages, and runs until interrupted or timed out.
#[derive(Parser, Debug)]
#[command(name = "wander")]
#[command(version = "1.0.0")]
#[command(about = "A noisy web traffic generator", long_about = None)]
struct Cli {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log: String,

    /// Overrides the configured session timeout (seconds)
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = load_config(&cli.config).context("failed to load configuration")?;

    if let Some(timeout) = cli.timeout {
        config.timeout = Some(timeout);
    }

    match wander(config).await {
        Ok(_reason) => Ok(()),
        Err(e) => {
            tracing::error!("Unrecoverable error: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the tracing subscriber from the requested level
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_new(format!("wander={},warn", level))
        .unwrap_or_else(|_| EnvFilter::new("wander=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
