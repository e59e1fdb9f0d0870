//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CacheConfig, ChannelSource, ConfigError, Environment, RedisConfig,
    SlackConfig, TtlConfig,
};
