//! # MYCOV Common Library
//!
//! Shared code for the three MYCOV programs (sync job, read API, chat bot):
//! - Daily/region record model
//! - Feed readers and the merge engine
//! - Incremental sync
//! - Notification formatting and delivery
//! - Chat query interpretation
//! - Record store and configuration loading

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod feeds;
pub mod format;
pub mod health;
pub mod merge;
pub mod model;
pub mod notify;
pub mod sync;
pub mod time;

pub use error::{Error, Result};
pub use format::{Formatter, RegionTags};
pub use model::{DailyRecord, RegionRecord};
