//! LIEN Console - library lending administration from the terminal

use anyhow::Context;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lien_console::{config::AppConfig, console::Console, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Logs go to stderr so they never interleave with rendered views
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lien_console={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting LIEN console v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Session stored in {}", config.session.storage_path.display());

    let state = AppState::new(config).context("Failed to initialize the console")?;

    let input = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(state, input, std::io::stdout());
    console.run().await?;

    Ok(())
}
