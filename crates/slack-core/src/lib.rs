//! # slack-core
//!
//! Domain layer for the Slack read-through cache: response and parameter
//! values, the error taxonomy, and the collaborator traits (remote API and
//! key-value store). This crate has zero dependencies on infrastructure
//! (Redis, HTTP, etc.).

pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use error::{SlackCacheError, SlackCacheResult, StoreError, StoreResult, TransportError};
pub use traits::{CacheStore, SlackApi};
pub use value_objects::{ApiParams, ApiResponse, Member, Presence, Profile};
