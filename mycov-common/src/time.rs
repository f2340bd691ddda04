//! Calendar date utilities
//!
//! Record dates travel as `YYYY-MM-DD` strings; arithmetic happens on
//! [`NaiveDate`].

use chrono::{NaiveDate, Utc};

use crate::{Error, Result};

/// Wire format of every record date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current UTC calendar date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid date '{}': {}", text, e)))
}

/// Render a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every date in `(after, through]`, ascending
pub fn days_after(after: NaiveDate, through: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    after
        .succ_opt()
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(move |day| *day <= through)
}
