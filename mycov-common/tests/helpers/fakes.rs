//! In-memory stand-ins for the feed source, notifier and store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use mycov_common::db::{RecordStore, SqliteRecordStore};
use mycov_common::feeds::{Feed, FeedSource};
use mycov_common::notify::Notifier;
use mycov_common::{DailyRecord, Error, Result};

/// Serves feed text from memory; unknown feeds answer 404
#[derive(Default)]
pub struct MemoryFeedSource {
    feeds: HashMap<Feed, String>,
}

impl MemoryFeedSource {
    pub fn new(feeds: HashMap<Feed, String>) -> Self {
        Self { feeds }
    }

    pub fn remove(&mut self, feed: Feed) {
        self.feeds.remove(&feed);
    }
}

#[async_trait]
impl FeedSource for MemoryFeedSource {
    async fn fetch(&self, feed: Feed) -> Result<String> {
        self.feeds
            .get(&feed)
            .cloned()
            .ok_or(Error::Feed { feed, status: 404 })
    }
}

/// Keeps every posted message
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn post(&self, text: &str) -> Result<()> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Rejects every message
#[derive(Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn post(&self, _text: &str) -> Result<()> {
        Err(Error::Notify {
            status: 500,
            body: "channel_unavailable".to_string(),
        })
    }
}

/// Fresh SQLite store in a temp dir
///
/// Returns (TempDir, store) - TempDir must be kept alive for duration of test
pub async fn open_test_store() -> (TempDir, SqliteRecordStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = SqliteRecordStore::open(&dir.path().join("test_mycov.db"))
        .await
        .expect("open store");
    (dir, store)
}

/// Real store whose `fail_on`-th insert (1-based) fails; reads pass through
pub struct FailingInsertStore {
    inner: SqliteRecordStore,
    fail_on: usize,
    inserts: AtomicUsize,
}

impl FailingInsertStore {
    pub fn new(inner: SqliteRecordStore, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            inserts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecordStore for FailingInsertStore {
    async fn latest(&self) -> Result<Option<DailyRecord>> {
        self.inner.latest().await
    }

    async fn find_by_date(&self, date: &str) -> Result<Option<DailyRecord>> {
        self.inner.find_by_date(date).await
    }

    async fn insert(&self, record: &DailyRecord) -> Result<()> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.insert(record).await
    }

    async fn dates(&self) -> Result<Vec<String>> {
        self.inner.dates().await
    }
}
