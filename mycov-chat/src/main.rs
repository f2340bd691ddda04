//! mycov-chat - Slack bot answering questions about daily records

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use mycov_chat::{build_router, AppState};
use mycov_common::config::AppConfig;
use mycov_common::db::SqliteRecordStore;
use mycov_common::notify::{LogNotifier, Notifier, SlackWebhook};

/// Command-line arguments for mycov-chat
#[derive(Parser, Debug)]
#[command(name = "mycov-chat")]
#[command(about = "Slack bot for Malaysia COVID-19 daily records")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `chat_bind`
    #[arg(short, long, env = "MYCOV_CHAT_BIND")]
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
        "Starting MYCOV Chat Bot (mycov-chat) v{} [{}] built {} ({})",
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

    let notifier: Arc<dyn Notifier> = match &config.slack_webhook_url {
        Some(url) => Arc::new(SlackWebhook::new(url.clone())?),
        None => {
            warn!("No Slack webhook configured; replies will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let interpreter = config
        .chat
        .interpreter()
        .context("Invalid chat configuration")?;
    info!(
        "Answering in {} channel(s), {} region alias(es)",
        config.chat.channels.len(),
        config.chat.region_aliases.len()
    );

    let state = AppState::new(
        Arc::new(store),
        notifier,
        interpreter,
        config.formatter(),
        config.chat.channels.clone(),
    );
    let app = build_router(state);

    let bind = args.bind.unwrap_or(config.chat_bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("mycov-chat listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
