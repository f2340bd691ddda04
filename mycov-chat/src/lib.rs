//! mycov-chat library - Slack chat bot
//!
//! Receives Slack Events API callbacks, works out what a message asks for
//! and posts one summary back to the channel.

use axum::Router;
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use mycov_common::chat::ChatInterpreter;
use mycov_common::db::RecordStore;
use mycov_common::notify::Notifier;
use mycov_common::Formatter;

pub mod api;
pub mod reply;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn Notifier>,
    pub interpreter: Arc<ChatInterpreter>,
    pub formatter: Formatter,
    /// Channels the bot answers in
    pub channels: Arc<HashSet<String>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        interpreter: ChatInterpreter,
        formatter: Formatter,
        channels: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            store,
            notifier,
            interpreter: Arc::new(interpreter),
            formatter,
            channels: Arc::new(channels.into_iter().collect()),
        }
    }

    pub fn allows_channel(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/slack/events", post(api::slack_events))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
