//! Incremental sync
//!
//! One pass: fetch and merge every feed, find the most recent stored date,
//! then persist and announce each later date up to and including today, in
//! ascending order. Dates with no merged record (feed gaps) are skipped.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::RecordStore;
use crate::feeds::{FeedSource, ParseMode};
use crate::format::Formatter;
use crate::merge::{merge, FeedSet};
use crate::model::DailyRecord;
use crate::notify::{post_all, Notifier};
use crate::time::{days_after, format_date, parse_date};
use crate::{Error, Result};

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Most recent stored date when the pass started
    pub latest_before: Option<String>,
    /// Dates inserted by this pass, ascending
    pub inserted: Vec<String>,
    /// Notifications the channel accepted
    pub notifications_sent: usize,
}

/// Merged records strictly after `last` and no later than `today`, ascending
pub fn pending_records(
    merged: &BTreeMap<String, DailyRecord>,
    last: NaiveDate,
    today: NaiveDate,
) -> Vec<&DailyRecord> {
    days_after(last, today)
        .filter_map(|day| merged.get(&format_date(day)))
        .collect()
}

/// Fetch → merge → persist → notify
pub struct SyncJob {
    source: Arc<dyn FeedSource>,
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    formatter: Formatter,
    mode: ParseMode,
    country: String,
}

impl SyncJob {
    pub fn new(
        source: Arc<dyn FeedSource>,
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        formatter: Formatter,
        country: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            notifier,
            formatter,
            mode: ParseMode::default(),
            country: country.into(),
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    async fn load(&self) -> Result<BTreeMap<String, DailyRecord>> {
        let feeds = FeedSet::fetch(self.source.as_ref(), self.mode).await?;
        let merged = merge(&feeds, &self.country);
        info!("Merged {} daily records", merged.len());
        Ok(merged)
    }

    /// Run one incremental pass ending at `today`
    ///
    /// An empty store is fatal ([`Error::NotSeeded`]); use [`SyncJob::seed`]
    /// first. An insert failure aborts the rest of the range; records already
    /// inserted stay. Notification failures never abort.
    pub async fn run(&self, today: NaiveDate) -> Result<SyncReport> {
        let merged = self.load().await?;

        let latest = self.store.latest().await?.ok_or(Error::NotSeeded)?;
        let last = parse_date(&latest.date)?;
        info!("Latest stored record: {}, syncing through {}", latest.date, format_date(today));

        let mut report = SyncReport {
            latest_before: Some(latest.date.clone()),
            ..SyncReport::default()
        };

        for record in pending_records(&merged, last, today) {
            self.store.insert(record).await?;
            info!("✓ Inserted record for {}", record.date);
            report.inserted.push(record.date.clone());

            let messages = self.formatter.sync_messages(record);
            report.notifications_sent += post_all(self.notifier.as_ref(), &messages).await;
        }

        if report.inserted.is_empty() {
            info!("No new records");
        } else {
            debug!(
                inserted = report.inserted.len(),
                notified = report.notifications_sent,
                "Sync pass complete"
            );
        }

        Ok(report)
    }

    /// Fill an empty store with every merged record, without notifying
    ///
    /// Returns the number of records inserted.
    pub async fn seed(&self) -> Result<usize> {
        if let Some(existing) = self.store.latest().await? {
            return Err(Error::AlreadySeeded(existing.date));
        }

        let merged = self.load().await?;
        for record in merged.values() {
            self.store.insert(record).await?;
        }
        info!("✓ Seeded {} records", merged.len());
        Ok(merged.len())
    }
}
