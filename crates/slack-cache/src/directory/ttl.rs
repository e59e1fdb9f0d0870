//! Per-entity expiry policy.

use slack_common::TtlConfig;

/// User name map and ignored set TTL (5 days)
const USERS_TTL: u64 = 60 * 60 * 24 * 5;
/// Profile hash TTL (5 days)
const PROFILE_TTL: u64 = 60 * 60 * 24 * 5;
/// Channel member set TTL (16 hours)
const CHANNEL_TTL: u64 = 60 * 60 * 16;
/// Presence hash TTL (20 minutes)
const PRESENCE_TTL: u64 = 60 * 20;

/// TTLs in seconds for each cached entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub users: u64,
    pub profile: u64,
    pub channel: u64,
    pub presence: u64,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            users: USERS_TTL,
            profile: PROFILE_TTL,
            channel: CHANNEL_TTL,
            presence: PRESENCE_TTL,
        }
    }
}

impl From<&TtlConfig> for TtlPolicy {
    fn from(config: &TtlConfig) -> Self {
        Self {
            users: config.users,
            profile: config.profile,
            channel: config.channel,
            presence: config.presence,
        }
    }
}
