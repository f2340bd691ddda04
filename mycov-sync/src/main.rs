//! mycov-sync - daily feed sync job
//!
//! Fetches every feed, merges them, stores each new date and posts its
//! summaries to the chat channel. Meant to run from a scheduler once or a
//! few times a day; each run is a single pass.
//!
//! `--seed` fills an empty store with the full history instead.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use mycov_common::config::AppConfig;
use mycov_common::db::SqliteRecordStore;
use mycov_common::feeds::HttpFeedSource;
use mycov_common::notify::{LogNotifier, Notifier, SlackWebhook};
use mycov_common::sync::SyncJob;
use mycov_common::{time, Error};

/// Command-line arguments for mycov-sync
#[derive(Parser, Debug)]
#[command(name = "mycov-sync")]
#[command(about = "Sync Malaysia COVID-19 feeds into the record store")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the full history into an empty store, without notifications
    #[arg(long)]
    seed: bool,

    /// Sync through this date (YYYY-MM-DD) instead of today (UTC)
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Log summaries instead of posting them
    #[arg(long, env = "MYCOV_NO_NOTIFY")]
    no_notify: bool,
}

fn parse_today(text: &str) -> std::result::Result<NaiveDate, String> {
    time::parse_date(text).map_err(|e| e.to_string())
}

fn notifier(config: &AppConfig, no_notify: bool) -> Result<Arc<dyn Notifier>> {
    match (&config.slack_webhook_url, no_notify) {
        (Some(url), false) => {
            info!("✓ Posting summaries to Slack webhook");
            Ok(Arc::new(SlackWebhook::new(url.clone())?))
        }
        (None, false) => {
            warn!("No Slack webhook configured; summaries will only be logged");
            Ok(Arc::new(LogNotifier))
        }
        (_, true) => {
            info!("Notifications disabled; summaries will only be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
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
        "Starting MYCOV Sync (mycov-sync) v{} [{}] built {} ({})",
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

    info!("Feed source: {}", config.feed_base_url);
    let source = HttpFeedSource::new(config.feed_base_url.clone(), config.feed_timeout())?;

    let job = SyncJob::new(
        Arc::new(source),
        Arc::new(store),
        notifier(&config, args.no_notify)?,
        config.formatter(),
        config.country_name.clone(),
    )
    .with_parse_mode(config.parse_mode());

    if args.seed {
        let count = job.seed().await.context("Seeding failed")?;
        info!("✓ Seed complete: {} records", count);
        return Ok(());
    }

    let today = args.today.unwrap_or_else(time::today);
    match job.run(today).await {
        Ok(report) => {
            info!(
                "✓ Sync complete: {} new record(s), {} notification(s) sent",
                report.inserted.len(),
                report.notifications_sent
            );
            Ok(())
        }
        Err(Error::NotSeeded) => {
            error!("Record store is empty; run `mycov-sync --seed` first");
            Err(Error::NotSeeded.into())
        }
        Err(e) => Err(anyhow::Error::new(e).context("Sync failed")),
    }
}
