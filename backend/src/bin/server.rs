//! Dashboard HTTP Server Binary
//!
//! Loads the order table once and serves the dashboard API.
//!
//! # Usage
//!
//! ```bash
//! DASHBOARD_DATA_PATH=all_data.csv cargo run --bin dashboard-server
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATA_PATH`: CSV file with the order table (default: all_data.csv)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Values from `dashboard.toml` are used when the variables are unset.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use order_dashboard::config::DashboardConfig;
use order_dashboard::data::OrderLoader;
use order_dashboard::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting order dashboard server");

    let config = DashboardConfig::load().context("Failed to load configuration")?;

    // The base table is loaded once and shared read-only by every request
    let data_path = config.data.path.clone();
    let table = tokio::task::spawn_blocking(move || OrderLoader::load_from_csv(&data_path))
        .await
        .context("Table loader task failed")?
        .with_context(|| format!("Failed to load orders from {}", config.data.path.display()))?;
    info!(rows = table.len(), "Order table loaded");

    let state = AppState::new(Arc::new(table));
    let app = create_router(state);

    let addr = config.bind_address()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
