//! Common error types for MYCOV

use thiserror::Error;

use crate::feeds::Feed;

/// Common result type for MYCOV operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the MYCOV programs
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status
    #[error("Feed {feed} returned HTTP {status}")]
    Feed { feed: Feed, status: u16 },

    /// Malformed tabular text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Feed header lacks a column the reader depends on
    #[error("Feed {feed} is missing required column '{column}'")]
    Schema { feed: Feed, column: String },

    /// Non-numeric cell, only raised in strict parse mode
    #[error("Feed {feed} line {line}: column '{column}' is not an integer ({value:?})")]
    InvalidCell {
        feed: Feed,
        line: u64,
        column: String,
        value: String,
    },

    /// Chat channel rejected an outbound message
    #[error("Notification rejected (HTTP {status}): {body}")]
    Notify { status: u16, body: String },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sync has no persisted record to resume from
    #[error("Record store is empty; seed it with historical records before syncing")]
    NotSeeded,

    /// Seeding was requested against a store that already holds records
    #[error("Record store already holds records (latest {0}); refusing to seed")]
    AlreadySeeded(String),
}
