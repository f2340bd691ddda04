//! Document store for [`DailyRecord`]s
//!
//! Each record is stored whole as one JSON document keyed by its date. The
//! only queries are exact date match and most recent date; the only write is
//! insert-one. Records are never updated or deleted.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::Path;

use crate::model::DailyRecord;
use crate::Result;

/// Storage operations used by the sync job, read API and chat bot
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Record with the greatest date, if any
    async fn latest(&self) -> Result<Option<DailyRecord>>;

    /// Record whose date equals `date` exactly
    async fn find_by_date(&self, date: &str) -> Result<Option<DailyRecord>>;

    /// Insert one new record
    async fn insert(&self, record: &DailyRecord) -> Result<()>;

    /// Every stored date, newest first
    async fn dates(&self) -> Result<Vec<String>>;
}

/// SQLite-backed [`RecordStore`]
#[derive(Clone)]
pub struct SqliteRecordStore {
    db: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Open (and create if missing) the store at `db_path`
    pub async fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::new(super::init_database(db_path).await?))
    }

    fn decode(document: Option<String>) -> Result<Option<DailyRecord>> {
        document
            .map(|doc| serde_json::from_str(&doc).map_err(Into::into))
            .transpose()
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn latest(&self) -> Result<Option<DailyRecord>> {
        let document: Option<String> = sqlx::query_scalar(
            "SELECT document FROM daily_records ORDER BY date DESC LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await?;

        Self::decode(document)
    }

    async fn find_by_date(&self, date: &str) -> Result<Option<DailyRecord>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM daily_records WHERE date = ?")
                .bind(date)
                .fetch_optional(&self.db)
                .await?;

        Self::decode(document)
    }

    async fn insert(&self, record: &DailyRecord) -> Result<()> {
        let document = serde_json::to_string(record)?;
        sqlx::query("INSERT INTO daily_records (date, document) VALUES (?, ?)")
            .bind(&record.date)
            .bind(document)
            .execute(&self.db)
            .await?;

        tracing::debug!(date = %record.date, "Inserted daily record");
        Ok(())
    }

    async fn dates(&self) -> Result<Vec<String>> {
        let dates: Vec<String> = sqlx::query_scalar("SELECT date FROM daily_records ORDER BY date DESC")
            .fetch_all(&self.db)
            .await?;
        Ok(dates)
    }
}
