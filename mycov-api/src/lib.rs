//! mycov-api library - read-only record API
//!
//! Serves stored daily records as JSON: the latest one, one by date, and the
//! list of stored dates.

use axum::http::{header, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mycov_common::db::RecordStore;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Build application router
///
/// Browsers may call every route from any origin; only `GET` with a
/// `Content-Type` header is allowed cross-origin.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/records", get(api::list_dates))
        .route("/records/latest", get(api::latest_record))
        .route("/records/:date", get(api::record_by_date))
        .merge(api::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
