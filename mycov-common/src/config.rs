//! Configuration loading
//!
//! Config file resolution priority:
//! 1. Command-line `--config` argument (highest priority)
//! 2. `MYCOV_CONFIG` environment variable
//! 3. `<config dir>/mycov/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! After the file is loaded, `MYCOV_DATABASE`, `MYCOV_SLACK_WEBHOOK` and
//! `MYCOV_FEED_BASE_URL` override the matching fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::chat::{default_region_aliases, ChatInterpreter};
use crate::feeds::{ParseMode, DEFAULT_BASE_URL};
use crate::format::{default_region_tags, Formatter, RegionTags};
use crate::{Error, Result};

pub const CONFIG_ENV: &str = "MYCOV_CONFIG";
pub const DATABASE_ENV: &str = "MYCOV_DATABASE";
pub const SLACK_WEBHOOK_ENV: &str = "MYCOV_SLACK_WEBHOOK";
pub const FEED_BASE_URL_ENV: &str = "MYCOV_FEED_BASE_URL";

/// Settings shared by the sync job, read API and chat bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the daily records
    pub database_path: PathBuf,
    /// Base URL the feed paths are resolved against
    pub feed_base_url: String,
    pub feed_timeout_secs: u64,
    /// Name of the country row in the population feed
    pub country_name: String,
    /// Reject unparseable numeric cells instead of reading them as zero
    pub strict_numbers: bool,
    /// Slack incoming webhook; notifications are only logged when unset
    pub slack_webhook_url: Option<String>,
    pub api_bind: String,
    pub chat_bind: String,
    pub chat: ChatConfig,
    /// Region name → display tag (emoji) used in notifications
    pub region_tags: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            feed_base_url: DEFAULT_BASE_URL.to_string(),
            feed_timeout_secs: 60,
            country_name: "Malaysia".to_string(),
            strict_numbers: false,
            slack_webhook_url: None,
            api_bind: "127.0.0.1:5810".to_string(),
            chat_bind: "127.0.0.1:5811".to_string(),
            chat: ChatConfig::default(),
            region_tags: default_region_tags(),
        }
    }
}

/// Chat bot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Channels the bot answers in; messages elsewhere are ignored
    pub channels: Vec<String>,
    pub bot_user_id: Option<String>,
    /// Words asking for the national figures
    pub country_keywords: Vec<String>,
    /// Lowercase search text → canonical region name
    pub region_aliases: BTreeMap<String, String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            channels: vec!["C0188FC7MAP".to_string(), "G01FLHXFZTM".to_string()],
            bot_user_id: Some("U0188FCRJ9H".to_string()),
            country_keywords: vec!["malaysia".to_string(), "cobis".to_string()],
            region_aliases: default_region_aliases(),
        }
    }
}

impl ChatConfig {
    pub fn interpreter(&self) -> Result<ChatInterpreter> {
        ChatInterpreter::new(
            &self.region_aliases,
            &self.country_keywords,
            self.bot_user_id.as_deref(),
        )
    }
}

impl AppConfig {
    /// Resolve, read and parse the config file, then apply env overrides
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_file_path(cli_path) {
            ConfigPath::Explicit(path) => Self::from_file(&path)?,
            ConfigPath::Default(Some(path)) if path.exists() => Self::from_file(&path)?,
            ConfigPath::Default(path) => {
                warn!(
                    "No config file found{}, using defaults",
                    path.map(|p| format!(" at {}", p.display()))
                        .unwrap_or_default()
                );
                Self::default()
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse one TOML file; a missing or malformed file is an error
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = non_empty_env(DATABASE_ENV) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(url) = non_empty_env(SLACK_WEBHOOK_ENV) {
            self.slack_webhook_url = Some(url);
        }
        if let Some(url) = non_empty_env(FEED_BASE_URL_ENV) {
            self.feed_base_url = url;
        }
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_numbers {
            ParseMode::Strict
        } else {
            ParseMode::Tolerant
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn region_tags(&self) -> RegionTags {
        RegionTags::new(self.region_tags.clone())
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.region_tags(), self.country_name.clone())
    }
}

enum ConfigPath {
    /// Named on the command line or in the environment; must exist
    Explicit(PathBuf),
    /// Platform default; may be absent
    Default(Option<PathBuf>),
}

fn config_file_path(cli_path: Option<&Path>) -> ConfigPath {
    if let Some(path) = cli_path {
        return ConfigPath::Explicit(path.to_path_buf());
    }
    if let Some(path) = non_empty_env(CONFIG_ENV) {
        return ConfigPath::Explicit(PathBuf::from(path));
    }
    ConfigPath::Default(dirs::config_dir().map(|d| d.join("mycov").join("config.toml")))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mycov").join("mycov.db"))
        .unwrap_or_else(|| PathBuf::from("./mycov_data/mycov.db"))
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.feed_timeout_secs, 60);
        assert_eq!(config.country_name, "Malaysia");
        assert_eq!(config.parse_mode(), ParseMode::Tolerant);
        assert!(config.slack_webhook_url.is_none());
        assert_eq!(config.region_tags.get("Selangor").unwrap(), ":selangor:");
        assert!(config.chat.channels.contains(&"C0188FC7MAP".to_string()));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            strict_numbers = true
            feed_timeout_secs = 5

            [chat]
            channels = ["C1"]

            [region_tags]
            Malaysia = "MY"
            "#,
        )
        .unwrap();

        assert_eq!(config.parse_mode(), ParseMode::Strict);
        assert_eq!(config.feed_timeout(), Duration::from_secs(5));
        assert_eq!(config.chat.channels, vec!["C1"]);
        // Unlisted chat fields keep their defaults
        assert_eq!(config.chat.country_keywords, vec!["malaysia", "cobis"]);
        // A provided tag table replaces the default one wholesale
        assert_eq!(config.region_tags.len(), 1);
        assert_eq!(config.region_tags().tag("Malaysia"), "MY");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml("feed_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_interpreter_from_chat_config() {
        let interpreter = ChatConfig::default().interpreter().unwrap();
        assert_eq!(
            interpreter.interpret("<@U0188FCRJ9H>"),
            crate::chat::ChatQuery::Greeting
        );
    }
}
