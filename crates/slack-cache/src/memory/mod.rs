//! In-process store module.
//!
//! A `CacheStore` kept in process memory, for tests and single-process
//! deployments that have no Redis.

mod memory_store;

pub use memory_store::{MemoryStore, StoreStats};
