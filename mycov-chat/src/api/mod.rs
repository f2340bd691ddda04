//! HTTP API handlers for mycov-chat

pub mod events;
pub mod health;

pub use events::slack_events;
pub use health::health_routes;
