//! # slack-common
//!
//! Shared utilities including configuration and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, CacheConfig, ChannelSource, ConfigError, Environment, RedisConfig,
    SlackConfig, TtlConfig,
};
pub use telemetry::{init_tracing, try_init_tracing, LogFormat, TracingConfig, TracingError};
