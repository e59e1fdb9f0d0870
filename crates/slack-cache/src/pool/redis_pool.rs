//! Redis-backed `CacheStore` over a deadpool connection pool.
//!
//! Each store method checks out one connection and issues one command;
//! nothing is pipelined or wrapped in MULTI.

use std::collections::HashMap;

use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use slack_core::{CacheStore, StoreError, StoreResult};

const DEFAULT_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Redis pool configuration
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    /// Connection URL, credentials included (e.g. `redis://:secret@cache:6379/0`)
    pub url: String,
    pub max_connections: usize,
}

impl Default for RedisPoolConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl From<&slack_common::RedisConfig> for RedisPoolConfig {
    fn from(config: &slack_common::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            max_connections: config.max_connections as usize,
        }
    }
}

/// Error type for Redis pool operations
#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool configuration: {0}")]
    CreatePool(String),

    #[error("No Redis connection available: {0}")]
    GetConnection(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Refusing to expire with a TTL of {0} seconds")]
    InvalidTtl(u64),
}

impl From<RedisPoolError> for StoreError {
    fn from(err: RedisPoolError) -> Self {
        match err {
            RedisPoolError::InvalidTtl(ttl) => Self::InvalidTtl(ttl),
            RedisPoolError::Redis(e) => Self::Command(e.to_string()),
            other => Self::Connection(other.to_string()),
        }
    }
}

/// Result type for Redis pool operations
pub type RedisResult<T> = Result<T, RedisPoolError>;

fn command_error(err: redis::RedisError) -> StoreError {
    RedisPoolError::Redis(err).into()
}

/// Host part of a Redis URL, without any `user:password@`
fn redact_url(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}

/// Pooled Redis connections serving the cache's hash and set commands
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
    endpoint: String,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("endpoint", &self.endpoint)
            .field("size", &status.size)
            .field("max_size", &status.max_size)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; connections are opened lazily on first use
    pub fn new(config: RedisPoolConfig) -> RedisResult<Self> {
        let builder = Config::from_url(config.url.as_str())
            .builder()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;
        let pool = builder
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::CreatePool(e.to_string()))?;

        let endpoint = redact_url(&config.url).to_string();
        tracing::info!(
            endpoint = %endpoint,
            max_connections = config.max_connections,
            "Redis store ready"
        );

        Ok(Self { pool, endpoint })
    }

    pub fn from_config(config: &slack_common::RedisConfig) -> RedisResult<Self> {
        Self::new(RedisPoolConfig::from(config))
    }

    /// Check out a connection
    pub async fn get(&self) -> RedisResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// PING the server
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// EXPIRE `key` after `ttl_seconds`
    ///
    /// Zero is rejected: `EXPIRE key 0` deletes the key outright.
    pub async fn expire_key(&self, key: &str, ttl_seconds: u64) -> RedisResult<bool> {
        let seconds = match i64::try_from(ttl_seconds) {
            Ok(s) if s > 0 => s,
            _ => return Err(RedisPoolError::InvalidTtl(ttl_seconds)),
        };
        let mut conn = self.get().await?;
        Ok(conn.expire(key, seconds).await?)
    }

    /// Remaining TTL in seconds; `None` when the key is gone, `-1` when it never expires
    pub async fn ttl(&self, key: &str) -> RedisResult<Option<i64>> {
        let mut conn = self.get().await?;
        let ttl: i64 = conn.ttl(key).await?;
        Ok((ttl != -2).then_some(ttl))
    }
}

#[async_trait]
impl CacheStore for RedisPool {
    async fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let mut conn = self.get().await?;
        conn.hget(key, field).await.map_err(command_error)
    }

    async fn hgetall(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.get().await?;
        conn.hgetall(key).await.map_err(command_error)
    }

    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()> {
        // HSET with no field/value pairs is a syntax error in Redis.
        if fields.is_empty() {
            return Ok(());
        }
        let mut conn = self.get().await?;
        conn.hset_multiple(key, fields).await.map_err(command_error)
    }

    async fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.get().await?;
        conn.smembers(key).await.map_err(command_error)
    }

    async fn sismember(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut conn = self.get().await?;
        conn.sismember(key, member).await.map_err(command_error)
    }

    async fn sadd(&self, key: &str, members: &[String]) -> StoreResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mut conn = self.get().await?;
        conn.sadd(key, members).await.map_err(command_error)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
        Ok(self.expire_key(key, ttl_seconds).await?)
    }
}
