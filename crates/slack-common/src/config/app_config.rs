//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::telemetry::LogFormat;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub slack: SlackConfig,
    pub redis: RedisConfig,
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Overrides the environment's default log format when set
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

/// Slack Web API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Which Web API method lists a channel's members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSource {
    /// `conversations.members`, members at the top level of the response
    #[default]
    Conversations,
    /// `channels.info`, members under `channel.members`
    Channels,
}

impl FromStr for ChannelSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conversations" => Ok(Self::Conversations),
            "channels" => Ok(Self::Channels),
            _ => Err(format!("Invalid channel source: {s}")),
        }
    }
}

/// Per-entity TTLs in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TtlConfig {
    #[serde(default = "default_ttl_users")]
    pub users: u64,
    #[serde(default = "default_ttl_profile")]
    pub profile: u64,
    #[serde(default = "default_ttl_channel")]
    pub channel: u64,
    #[serde(default = "default_ttl_presence")]
    pub presence: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            users: default_ttl_users(),
            profile: default_ttl_profile(),
            channel: default_ttl_channel(),
            presence: default_ttl_presence(),
        }
    }
}

/// Cache behaviour configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub channel_source: ChannelSource,
    #[serde(default)]
    pub ttl: TtlConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            channel_source: ChannelSource::default(),
            ttl: TtlConfig::default(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "slack-cache".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_api_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_prefix() -> String {
    "SLACKCACHE".to_string()
}

fn default_ttl_users() -> u64 {
    60 * 60 * 24 * 5 // 5 days
}

fn default_ttl_profile() -> u64 {
    60 * 60 * 24 * 5 // 5 days
}

fn default_ttl_channel() -> u64 {
    60 * 60 * 16 // 16 hours
}

fn default_ttl_presence() -> u64 {
    60 * 20 // 20 minutes
}

/// Parse a TTL in seconds; zero would leave keys without expiry
fn parse_ttl(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: fn() -> u64,
) -> Result<u64, ConfigError> {
    match parse_or(lookup, name, default)? {
        0 => Err(ConfigError::InvalidValue(name, "0".to_string())),
        ttl => Ok(ttl),
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", default_env)?,
                log_format: lookup("LOG_FORMAT")
                    .map(|raw| {
                        raw.parse()
                            .map_err(|_| ConfigError::InvalidValue("LOG_FORMAT", raw))
                    })
                    .transpose()?,
            },
            slack: SlackConfig {
                token: lookup("SLACK_TOKEN").ok_or(ConfigError::MissingVar("SLACK_TOKEN"))?,
                api_url: lookup("SLACK_API_URL").unwrap_or_else(default_api_url),
                timeout_secs: parse_or(&lookup, "SLACK_TIMEOUT_SECS", default_timeout_secs)?,
            },
            redis: RedisConfig {
                url: lookup("REDIS_URL").ok_or(ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "REDIS_MAX_CONNECTIONS",
                    default_redis_max_connections,
                )?,
            },
            cache: CacheConfig {
                prefix: lookup("SLACKCACHE_PREFIX").unwrap_or_else(default_prefix),
                channel_source: parse_or(
                    &lookup,
                    "SLACKCACHE_CHANNEL_SOURCE",
                    ChannelSource::default,
                )?,
                ttl: TtlConfig {
                    users: parse_ttl(&lookup, "SLACKCACHE_TTL_USERS", default_ttl_users)?,
                    profile: parse_ttl(&lookup, "SLACKCACHE_TTL_PROFILE", default_ttl_profile)?,
                    channel: parse_ttl(&lookup, "SLACKCACHE_TTL_CHANNEL", default_ttl_channel)?,
                    presence: parse_ttl(&lookup, "SLACKCACHE_TTL_PRESENCE", default_ttl_presence)?,
                },
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
