//! Collaborator traits (ports) - the two capabilities the cache depends on
//!
//! The cache defines what it needs; the Redis pool, the in-memory store, the
//! HTTP client and any test double provide the implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{StoreResult, TransportError};
use crate::value_objects::{ApiParams, ApiResponse};

// ============================================================================
// Remote API
// ============================================================================

#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Invoke a Web API method
    ///
    /// Returns the decoded response whatever its `ok` value; only faults in
    /// getting or decoding the response are errors.
    async fn call(&self, method: &str, params: &ApiParams) -> Result<ApiResponse, TransportError>;
}

// ============================================================================
// Key-value store
// ============================================================================

/// Hash, set and expiry commands over a shared key-value store
///
/// No transactions: each method is an independent command.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get one field of a hash
    async fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>>;

    /// Get every field of a hash (empty when the key is absent)
    async fn hgetall(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Set several hash fields at once
    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()>;

    /// Get all members of a set (empty when the key is absent)
    async fn smembers(&self, key: &str) -> StoreResult<Vec<String>>;

    /// Check set membership
    async fn sismember(&self, key: &str, member: &str) -> StoreResult<bool>;

    /// Add members to a set
    async fn sadd(&self, key: &str, members: &[String]) -> StoreResult<()>;

    /// Expire a key after `ttl_seconds`; false when the key does not exist
    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool>;
}
