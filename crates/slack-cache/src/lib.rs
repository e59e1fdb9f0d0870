//! # slack-cache
//!
//! Read-through cache in front of the Slack Web API, backed by Redis hashes
//! and sets with per-entity TTLs.
//!
//! ## Features
//!
//! - **Presence**: one hash of every user's presence, refreshed as a whole
//! - **User names**: name hash plus an ignored set (deleted, bot and system
//!   accounts), always refreshed together
//! - **Profiles**: one hash per user, with derived avatar and name lookups
//! - **Channel members**: one set per channel
//! - **Stores**: Redis pool (deadpool) and an in-process TTL-aware store
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use slack_cache::{CachedSlack, RedisPool, RedisPoolConfig};
//! use slack_client::WebClient;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let slack = WebClient::new(SlackClientConfig::new(token))?;
//! let cache = CachedSlack::new(Arc::new(pool), Arc::new(slack));
//!
//! if cache.is_present("U023BECGF").await? {
//!     let name = cache.user_name("U023BECGF").await?;
//!     let avatar = cache.avatar("U023BECGF", 192).await?;
//! }
//! ```

pub mod directory;
pub mod memory;
pub mod pool;

// Re-export directory types
pub use directory::{
    CacheKeys, CachedSlack, TtlPolicy, DEFAULT_AVATAR_SIZE, DEFAULT_PREFIX, SYSTEM_BOT_ID,
};

// Re-export store implementations
pub use memory::{MemoryStore, StoreStats};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export the domain types callers need alongside the cache
pub use slack_common::ChannelSource;
pub use slack_core::{
    ApiParams, ApiResponse, CacheStore, Profile, SlackApi, SlackCacheError, SlackCacheResult,
};
