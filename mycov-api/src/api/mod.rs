//! HTTP API handlers for mycov-api

pub mod health;
pub mod records;

pub use health::health_routes;
pub use records::{latest_record, list_dates, record_by_date, PrettyJson};
