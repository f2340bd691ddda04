//! Slack Events API endpoint
//!
//! `POST /slack/events` answers the `url_verification` handshake and handles
//! `event_callback` message events. Once the body parses, the response is
//! always 200 so Slack does not retry; failures are only logged.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::reply::reply_for;
use crate::AppState;

/// Tells Slack not to redeliver this event
const NO_RETRY: &str = "x-slack-no-retry";

/// Outer Slack callback envelope
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEnvelope {
    UrlVerification {
        challenge: String,
    },
    EventCallback {
        event: SlackEvent,
    },
    #[serde(other)]
    Unsupported,
}

/// Inner event; only message fields are used
#[derive(Debug, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    /// Present on messages posted by bots, our own webhook included
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
}

impl SlackEvent {
    /// Why this event gets no reply, if it doesn't
    fn skip_reason(&self, state: &AppState) -> Option<&'static str> {
        if self.kind != "message" {
            return Some("not a message");
        }
        if self.bot_id.is_some() || self.subtype.is_some() {
            return Some("bot or system message");
        }
        match self.channel.as_deref() {
            Some(channel) if state.allows_channel(channel) => None,
            _ => Some("channel not allowed"),
        }
    }
}

fn acknowledged() -> Response {
    ([(NO_RETRY, "1")], Json(json!({ "ok": true }))).into_response()
}

/// POST /slack/events
pub async fn slack_events(
    State(state): State<AppState>,
    Json(envelope): Json<SlackEnvelope>,
) -> Response {
    let event = match envelope {
        SlackEnvelope::UrlVerification { challenge } => {
            info!("Answering Slack URL verification");
            return Json(json!({ "challenge": challenge })).into_response();
        }
        SlackEnvelope::EventCallback { event } => event,
        SlackEnvelope::Unsupported => {
            debug!("Ignoring unsupported Slack callback");
            return acknowledged();
        }
    };

    if let Some(reason) = event.skip_reason(&state) {
        debug!(channel = ?event.channel, "Ignoring event: {}", reason);
        return acknowledged();
    }

    let text = event.text.as_deref().unwrap_or_default();
    let query = state.interpreter.interpret(text);
    debug!(user = ?event.user, ?query, "Interpreted message");

    match reply_for(state.store.as_ref(), &state.formatter, &query).await {
        Ok(reply) => {
            if let Err(e) = state.notifier.post(&reply).await {
                warn!("Failed to post reply: {}", e);
            }
        }
        Err(e) => error!("Failed to resolve reply: {}", e),
    }

    acknowledged()
}
