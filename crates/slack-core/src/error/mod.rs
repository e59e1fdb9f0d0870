//! Error taxonomy for the cache and its collaborators

mod cache_error;

pub use cache_error::{SlackCacheError, SlackCacheResult, StoreError, StoreResult, TransportError};
