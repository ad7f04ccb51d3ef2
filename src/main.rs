use anyhow::Result;
use bodycomp_estimator::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the key may come from the real environment
    dotenvy::dotenv().ok();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    // RUST_LOG may carry directives; only a bare level from the config is checked
    if std::env::var("RUST_LOG").is_err() {
        if let Err(e) = validate_log_level(&log_level) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let filter = EnvFilter::try_new(&log_level)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", log_level, e))?;

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        "Starting body composition estimator with log level: {}",
        log_level
    );
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
