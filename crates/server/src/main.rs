//! finews server entry point.
//!
//! Loads configuration, then serves the news and digest endpoints over HTTP.
//! Logs are JSON on stderr.

use anyhow::{Context, Result};
use finews_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod error;
mod handler;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let bind_addr = config.bind_addr.clone();
    tracing::debug!(?config, "configuration loaded");

    let state = handler::AppState::live(config)?;
    let app = handler::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!(addr = %bind_addr, "starting finews server");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
