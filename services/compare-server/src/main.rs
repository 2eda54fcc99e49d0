//! medcompare comparison web app entry point.
//!
//! Initialises tracing, loads configuration from environment variables
//! (prefixed with `MEDCOMPARE_SERVER_`), loads the CSV catalog once and
//! serves the comparison page plus a small JSON API.

mod error;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use medcompare_common::{Catalog, ComparisonRules};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

// ===================================================================
// Configuration
// ===================================================================

/// Server configuration loaded from environment variables via `envy`.
///
/// Each field maps to `MEDCOMPARE_SERVER_<FIELD>`:
///   - `MEDCOMPARE_SERVER_LISTEN_ADDR` (default `127.0.0.1:5000`)
///   - `MEDCOMPARE_SERVER_DATA_DIR`    (default `.`, holds the three CSV files)
#[derive(Debug, Deserialize)]
struct Config {
    /// Socket address to bind the HTTP server to.
    #[serde(default = "default_listen_addr")]
    listen_addr: String,

    /// Directory containing the catalog CSV files.
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

// ===================================================================
// Entry point
// ===================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("medcompare-server starting");

    let config: Config = envy::prefixed("MEDCOMPARE_SERVER_")
        .from_env()
        .context("failed to load config from MEDCOMPARE_SERVER_* env vars")?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.listen_addr))?;
    if !addr.ip().is_loopback() {
        tracing::warn!(%addr, "listening on a non-loopback address; the app has no authentication");
    }

    let catalog = Catalog::load(&config.data_dir)
        .with_context(|| format!("failed to load catalog from {}", config.data_dir.display()))?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        medicines = catalog.medicines().len(),
        plans = catalog.plans().len(),
        coverage_rows = catalog.coverage_rows().len(),
        "catalog loaded",
    );

    let state = Arc::new(AppState::new(catalog, ComparisonRules::default()));
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;
    tracing::info!("comparison app ready at http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("medcompare-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
