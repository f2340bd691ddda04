//! Record persistence

pub mod init;
pub mod store;

pub use init::init_database;
pub use store::{RecordStore, SqliteRecordStore};
