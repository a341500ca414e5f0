use anyhow::Result;
use tracing::info;
use whisper_relay::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so a missing endpoint fails before anything starts
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG overrides the configured level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match logging::env_filter(&log_filter) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting Whisper relay with log filter: {}", log_filter);

    server::run(config).await?;

    Ok(())
}
