//! Test Helper Utilities
//!
//! Shared fakes and fixtures for testing mycov-common

pub mod fakes;
pub mod fixtures;

pub use fakes::{
    open_test_store, FailingInsertStore, FailingNotifier, MemoryFeedSource, RecordingNotifier,
};
pub use fixtures::standard_feeds;
