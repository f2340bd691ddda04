//! mycov-api - read-only HTTP API over stored daily records

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use mycov_api::{build_router, AppState};
use mycov_common::config::AppConfig;
use mycov_common::db::SqliteRecordStore;

/// Command-line arguments for mycov-api
#[derive(Parser, Debug)]
#[command(name = "mycov-api")]
#[command(about = "Read API for Malaysia COVID-19 daily records")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `api_bind`
    #[arg(short, long, env = "MYCOV_API_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(
        "Starting MYCOV Read API (mycov-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    info!("Database path: {}", config.database_path.display());
    let store = SqliteRecordStore::open(&config.database_path)
        .await
        .context("Failed to open record store")?;
    info!("✓ Record store ready");

    let app = build_router(AppState::new(Arc::new(store)));

    let bind = args.bind.unwrap_or(config.api_bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("mycov-api listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
