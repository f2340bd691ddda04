//! Record endpoints
//!
//! - `GET /records/latest` most recent record
//! - `GET /records/:date` record for one `YYYY-MM-DD` date
//! - `GET /records` stored dates, newest first

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use mycov_common::time::{format_date, parse_date};
use mycov_common::DailyRecord;

use crate::{ApiError, ApiResult, AppState};

/// Indented JSON response body
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Err(e) => ApiError::Internal(e.into()).into_response(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DateList {
    pub dates: Vec<String>,
}

/// GET /records/latest
pub async fn latest_record(State(state): State<AppState>) -> ApiResult<PrettyJson<DailyRecord>> {
    let record = state
        .store
        .latest()
        .await?
        .ok_or_else(|| ApiError::NotFound("No records stored".to_string()))?;
    Ok(PrettyJson(record))
}

/// GET /records/:date
///
/// The date is normalised to `YYYY-MM-DD` before lookup.
pub async fn record_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<PrettyJson<DailyRecord>> {
    let date = parse_date(&date)
        .map(format_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let record = state
        .store
        .find_by_date(&date)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No record for {}", date)))?;
    Ok(PrettyJson(record))
}

/// GET /records
pub async fn list_dates(State(state): State<AppState>) -> ApiResult<PrettyJson<DateList>> {
    let dates = state.store.dates().await?;
    Ok(PrettyJson(DateList { dates }))
}
