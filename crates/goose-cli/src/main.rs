//! Terminal front-end for the goose-tap game.
//!
//! Wires the client services once at startup and hands them to the chosen
//! subcommand. Logs go to stderr so they never interleave with the screens
//! printed on stdout; set `RUST_LOG=debug` to see API traffic.

mod cli;
mod commands;
mod render;

use clap::Parser;
use goose_client::{ClientConfig, GooseClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the subcommand fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    info!(
        api_url = config.api_url,
        state_dir = %config.state_dir.display(),
        tick_ms = config.tick.as_millis(),
        "configuration loaded"
    );

    let client = GooseClient::from_config(&config);
    commands::run(cli.command, &client, &config).await
}
