//! Configuration for the chat dashboard.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{DashboardError, DashboardResult};

/// Environment variable overriding the HTTP port.
pub const ENV_PORT: &str = "CHAT_DASHBOARD_PORT";
/// Environment variable overriding the simulated reply delay (milliseconds).
pub const ENV_REPLY_DELAY_MS: &str = "CHAT_DASHBOARD_REPLY_DELAY_MS";
/// Environment variable toggling the welcome conversation (`true`/`false`).
pub const ENV_SEED: &str = "CHAT_DASHBOARD_SEED";

/// Top-level configuration for the dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Simulated assistant reply settings.
    pub reply: ReplyConfig,
    /// Conversation title settings.
    pub titles: TitleConfig,
    /// Welcome conversation settings.
    pub seed: SeedConfig,
    /// HTTP host settings.
    pub server: ServerConfig,
}

impl DashboardConfig {
    /// Build the default configuration and apply environment overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the default configuration and apply overrides read through
    /// `lookup`, keyed by the `CHAT_DASHBOARD_*` variable names.
    ///
    /// Values are trimmed before parsing; unparseable values keep the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(port) = parse_override(lookup(ENV_PORT)) {
            config.server.port = port;
        }
        if let Some(delay_ms) = parse_override(lookup(ENV_REPLY_DELAY_MS)) {
            config.reply.delay_ms = delay_ms;
        }
        if let Some(enabled) = parse_override(lookup(ENV_SEED)) {
            config.seed.enabled = enabled;
        }

        config
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.reply.delay_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "reply.delay_ms must be > 0".to_string(),
            ));
        }

        if self.titles.max_chars == 0 {
            return Err(DashboardError::InvalidConfig(
                "titles.max_chars must be > 0".to_string(),
            ));
        }

        if self.titles.default_title.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "titles.default_title must not be empty".to_string(),
            ));
        }

        if self.seed.enabled && self.seed.title.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "seed.title must not be empty when the seed is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(raw: Option<String>) -> Option<T> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

/// Simulated assistant reply settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Delay before the templated reply lands, in milliseconds.
    pub delay_ms: u64,
}

impl ReplyConfig {
    /// Delay as a [`Duration`].
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

/// Conversation title settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TitleConfig {
    /// Title given to freshly created conversations.
    pub default_title: String,
    /// Number of characters kept when a title is derived from a message.
    pub max_chars: usize,
    /// Marker appended when the message was longer than `max_chars`.
    pub ellipsis: String,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            default_title: "New Chat".to_string(),
            max_chars: 30,
            ellipsis: "...".to_string(),
        }
    }
}

/// Welcome conversation created at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether to create the welcome conversation.
    pub enabled: bool,
    /// Title of the welcome conversation.
    pub title: String,
    /// Assistant greeting stored as its only message.
    pub greeting: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Welcome Chat".to_string(),
            greeting: "Hello! I'm your AI assistant. How can I help you today?".to_string(),
        }
    }
}

/// HTTP host settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}
