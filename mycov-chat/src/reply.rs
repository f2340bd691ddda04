//! Reply resolution for interpreted chat queries

use mycov_common::chat::{ChatQuery, GREETING};
use mycov_common::db::RecordStore;
use mycov_common::format::NOT_UNDERSTOOD;
use mycov_common::{Formatter, Result};

/// Text to post back for `query`
///
/// A date with no stored record, or a region the record does not carry,
/// gets the not-understood reply.
pub async fn reply_for(
    store: &dyn RecordStore,
    formatter: &Formatter,
    query: &ChatQuery,
) -> Result<String> {
    let (record, region) = match query {
        ChatQuery::Greeting => return Ok(GREETING.to_string()),
        ChatQuery::Unrecognized => return Ok(NOT_UNDERSTOOD.to_string()),
        ChatQuery::Day { date, region } => (store.find_by_date(date).await?, region),
        ChatQuery::Latest { region } => (store.latest().await?, region),
    };

    Ok(match record {
        Some(record) => formatter.summarize(&record, region.as_deref()),
        None => NOT_UNDERSTOOD.to_string(),
    })
}
