//! Read-through directory over the Slack Web API.
//!
//! Key derivation, TTL policy and the `CachedSlack` façade.

mod cached_slack;
mod keys;
mod ttl;

pub use cached_slack::{CachedSlack, DEFAULT_AVATAR_SIZE, SYSTEM_BOT_ID};
pub use keys::{CacheKeys, DEFAULT_PREFIX};
pub use ttl::TtlPolicy;
