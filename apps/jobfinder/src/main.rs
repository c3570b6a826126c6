mod analysis_client;
mod config;
mod console;
mod errors;
mod models;
mod orchestrator;
mod presenter;
mod router;
mod session;
mod upload;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis_client::{CallOutcome, HttpJobBackend, JobBackend};
use crate::config::Config;
use crate::console::Console;
use crate::router::ViewRouter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout belongs to the console.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting AI Job Finder v{}", env!("CARGO_PKG_VERSION"));

    let backend = Arc::new(HttpJobBackend::new(&config.api_base_url)?);
    info!("Backend: {}", config.api_base_url);

    match backend.health().await {
        CallOutcome::Ok(health) => info!(
            "Backend status: {} ({}) {}",
            health.status,
            health.version.as_deref().unwrap_or("unknown version"),
            health.message.as_deref().unwrap_or_default()
        ),
        other => warn!("Backend health check failed: {:?}", other.kind()),
    }

    let router = ViewRouter::new(backend);
    let mut console = Console::new(
        router,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    console.run().await?;

    info!("Goodbye");
    Ok(())
}
