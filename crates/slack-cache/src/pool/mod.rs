//! Redis connection pool module.
//!
//! Provides connection pooling for Redis using deadpool-redis, and the
//! `CacheStore` implementation backed by it.

mod redis_pool;

pub use redis_pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
