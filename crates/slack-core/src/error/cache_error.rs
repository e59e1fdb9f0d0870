//! Cache errors - failures surfaced by the read-through operations
//!
//! Failures are distinguished by variant, never by message text:
//! - `RemoteApi`: Slack answered with `ok: false`
//! - `Transport`: the call itself failed or the response was unusable
//! - `MissingField`: a derived profile read found no such field
//! - `Store`: the key-value store rejected a command

use thiserror::Error;

/// Errors surfaced by `CachedSlack` operations
#[derive(Debug, Error)]
pub enum SlackCacheError {
    /// The remote API explicitly reported failure.
    #[error("Slack method {method} failed: {error}")]
    RemoteApi { method: String, error: String },

    /// Transport-level fault from the remote client, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Profile for {user_id} has no field {field}")]
    MissingField { user_id: String, field: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SlackCacheError {
    /// Build a `RemoteApi` error from a method name and the reported error code
    pub fn remote_api(method: impl Into<String>, error: impl Into<String>) -> Self {
        Self::RemoteApi {
            method: method.into(),
            error: error.into(),
        }
    }

    /// Build a `MissingField` error
    pub fn missing_field(user_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            user_id: user_id.into(),
            field: field.into(),
        }
    }

    /// Get an error code string for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::RemoteApi { .. } => "REMOTE_API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// The error identifier Slack reported, if this is a `RemoteApi` error
    pub fn remote_error(&self) -> Option<&str> {
        match self {
            Self::RemoteApi { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_remote_api(&self) -> bool {
        matches!(self, Self::RemoteApi { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type for cache operations
pub type SlackCacheResult<T> = Result<T, SlackCacheError>;

/// Faults raised by a `SlackApi` implementation
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but does not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Faults raised by a `CacheStore` implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command error: {0}")]
    Command(String),

    #[error("Invalid TTL: {0} seconds")]
    InvalidTtl(u64),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
