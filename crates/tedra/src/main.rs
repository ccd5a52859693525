use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use tedra_models::TedraConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tedra",
    about = "Transactive energy demand response agent - bids a demand curve into market clearing rounds and emits curtailment events"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/tedra.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("Failed to read config: {}", cli.config))?;
    let config: TedraConfig =
        toml::from_str(&config_str).with_context(|| "Failed to parse config")?;

    let handles = tedra::build_participant(&config)
        .await
        .context("Failed to build participant")?;

    let rx = handles.remote.subscribe();
    let cancel = CancellationToken::new();

    // Handle shutdown signals
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received shutdown signal");
        cancel_clone.cancel();
    });

    handles.participant.run(rx, cancel).await;

    Ok(())
}
