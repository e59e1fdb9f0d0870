//! Read-through façade over the Slack Web API.
//!
//! Every lookup reads the store first. A hit is returned as-is, however old,
//! as long as the store still holds the key. A miss makes one remote call,
//! writes the whole normalized result back with a TTL and returns it.
//!
//! Concurrent misses on the same key are not collapsed: each caller makes
//! its own remote call and the last write wins. Remote calls are idempotent
//! and writes replace whole entries, so this only wastes calls.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use slack_common::{CacheConfig, ChannelSource};
use slack_core::{
    ApiParams, ApiResponse, CacheStore, Member, Profile, SlackApi, SlackCacheError,
    SlackCacheResult, StoreError,
};
use tracing::{debug, error, info, instrument, warn};

use super::keys::CacheKeys;
use super::ttl::TtlPolicy;

/// Avatar size used when callers have no preference
pub const DEFAULT_AVATAR_SIZE: u32 = 192;

/// Slackbot reports `is_bot: false`, so it is always added to the ignored set.
pub const SYSTEM_BOT_ID: &str = "slackbot";

const METHOD_USERS_LIST: &str = "users.list";
const METHOD_USERS_INFO: &str = "users.info";
const METHOD_CONVERSATIONS_MEMBERS: &str = "conversations.members";
const METHOD_CHANNELS_INFO: &str = "channels.info";

/// Cached view of Slack users, presence, profiles and channel members
#[derive(Clone)]
pub struct CachedSlack {
    store: Arc<dyn CacheStore>,
    slack: Arc<dyn SlackApi>,
    keys: CacheKeys,
    ttl: TtlPolicy,
    channel_source: ChannelSource,
}

impl std::fmt::Debug for CachedSlack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSlack")
            .field("keys", &self.keys)
            .field("ttl", &self.ttl)
            .field("channel_source", &self.channel_source)
            .finish_non_exhaustive()
    }
}

impl CachedSlack {
    /// Create a cache with the default prefix and TTLs
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, slack: Arc<dyn SlackApi>) -> Self {
        Self {
            store,
            slack,
            keys: CacheKeys::default(),
            ttl: TtlPolicy::default(),
            channel_source: ChannelSource::default(),
        }
    }

    /// Create a cache whose keys live under `prefix`
    #[must_use]
    pub fn with_prefix(
        store: Arc<dyn CacheStore>,
        slack: Arc<dyn SlackApi>,
        prefix: impl Into<String>,
    ) -> Self {
        Self::new(store, slack).with_keys(CacheKeys::new(prefix))
    }

    /// Create a cache from slack-common config
    #[must_use]
    pub fn from_config(
        store: Arc<dyn CacheStore>,
        slack: Arc<dyn SlackApi>,
        config: &CacheConfig,
    ) -> Self {
        Self::new(store, slack)
            .with_keys(CacheKeys::new(config.prefix.clone()))
            .with_ttl(TtlPolicy::from(&config.ttl))
            .with_channel_source(config.channel_source)
    }

    #[must_use]
    pub fn with_keys(mut self, keys: CacheKeys) -> Self {
        self.keys = keys;
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_channel_source(mut self, source: ChannelSource) -> Self {
        self.channel_source = source;
        self
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    pub fn ttl(&self) -> &TtlPolicy {
        &self.ttl
    }

    /// Call a Web API method, turning `ok: false` into `RemoteApi`
    ///
    /// A warning on a successful response is logged and otherwise ignored.
    /// Transport faults pass through unchanged. No retries.
    pub async fn call(&self, method: &str, params: &ApiParams) -> SlackCacheResult<ApiResponse> {
        debug!(method, params = %params, "Calling Slack method");
        let response = self.slack.call(method, params).await?;

        if !response.is_ok() {
            let reported = response.error().unwrap_or("unknown_error").to_string();
            error!(method, error = %reported, response = ?response, "Slack method failed");
            return Err(SlackCacheError::remote_api(method, reported));
        }

        if let Some(warning) = response.warning() {
            warn!(method, warning, "Slack method raised a warning");
        }

        Ok(response)
    }

    /// Check whether a user is marked `active`
    ///
    /// A miss refreshes presence for every user in one `users.list` call.
    #[instrument(skip(self), level = "debug")]
    pub async fn is_present(&self, user_id: &str) -> SlackCacheResult<bool> {
        let key = self.keys.presence();

        if let Some(cached) = self.store.hget(&key, user_id).await? {
            if !cached.is_empty() {
                debug!(user_id, presence = %cached, "Presence cache hit");
                return Ok(cached == "active");
            }
        }

        info!("Refreshing presence");
        let response = self
            .call(METHOD_USERS_LIST, &ApiParams::new().with("presence", true))
            .await?;
        let members: Vec<Member> = response.extract(&["members"])?;

        let presence: HashMap<String, String> = members
            .iter()
            .map(|m| (m.id.clone(), m.presence().as_str().to_string()))
            .collect();

        self.write_hash(&key, presence.clone().into_iter().collect(), self.ttl.presence)
            .await?;

        Ok(presence.get(user_id).is_some_and(|p| p == "active"))
    }

    /// Get the user name for a user id
    ///
    /// Returns `None` for unknown users and for anyone in the ignored set,
    /// even when a name is cached for them.
    #[instrument(skip(self), level = "debug")]
    pub async fn user_name(&self, user_id: &str) -> SlackCacheResult<Option<String>> {
        let users_key = self.keys.users();
        let ignored_key = self.keys.ignored();

        if let Some(cached) = self.store.hget(&users_key, user_id).await? {
            if !cached.is_empty() {
                debug!(user_id, "User name cache hit");
                if self.store.sismember(&ignored_key, user_id).await? {
                    return Ok(None);
                }
                return Ok(Some(cached));
            }
        }

        info!("Refreshing user list");
        let response = self.call(METHOD_USERS_LIST, &ApiParams::new()).await?;
        let members: Vec<Member> = response.extract(&["members"])?;

        let names: HashMap<String, String> = members
            .iter()
            .filter_map(|m| m.name.as_ref().map(|name| (m.id.clone(), name.clone())))
            .collect();

        let mut ignored: Vec<String> = members
            .iter()
            .filter(|m| m.is_ignored())
            .map(|m| m.id.clone())
            .collect();
        ignored.push(SYSTEM_BOT_ID.to_string());

        // Both keys come from the same response so they never disagree.
        self.write_hash(&users_key, names.clone().into_iter().collect(), self.ttl.users)
            .await?;
        self.write_set(&ignored_key, &ignored, self.ttl.users).await?;

        if ignored.iter().any(|id| id == user_id) {
            return Ok(None);
        }
        Ok(names.get(user_id).cloned())
    }

    /// Fetch a user's profile fields
    #[instrument(skip(self), level = "debug")]
    pub async fn profile(&self, user_id: &str) -> SlackCacheResult<Profile> {
        let key = self.keys.profile(user_id);

        let cached = self.store.hgetall(&key).await?;
        if !cached.is_empty() {
            debug!(user_id, fields = cached.len(), "Profile cache hit");
            return Ok(Profile::from(cached));
        }

        info!(user_id, "Refreshing profile");
        let response = self
            .call(METHOD_USERS_INFO, &ApiParams::new().with("user", user_id))
            .await?;
        let raw: Map<String, Value> = response.extract(&["user", "profile"])?;
        let profile = Profile::from_json(&raw);

        self.write_hash(&key, profile.to_pairs(), self.ttl.profile)
            .await?;

        Ok(profile)
    }

    /// Avatar URL of exactly `size` pixels (the `image_<size>` profile field)
    pub async fn avatar(&self, user_id: &str, size: u32) -> SlackCacheResult<String> {
        debug!(user_id, size, "Fetching avatar");
        self.profile_field(user_id, &format!("image_{size}")).await
    }

    /// Display name from the profile, or the real name when `real_name` is set
    pub async fn display_name(&self, user_id: &str, real_name: bool) -> SlackCacheResult<String> {
        let field = if real_name { "real_name" } else { "display_name" };
        self.profile_field(user_id, field).await
    }

    /// Member ids of a channel, sorted
    #[instrument(skip(self), level = "debug")]
    pub async fn channel_members(&self, channel_id: &str) -> SlackCacheResult<Vec<String>> {
        let key = self.keys.channel(channel_id);

        let mut cached = self.store.smembers(&key).await?;
        if !cached.is_empty() {
            debug!(channel_id, members = cached.len(), "Channel cache hit");
            cached.sort();
            return Ok(cached);
        }

        info!(channel_id, source = ?self.channel_source, "Refreshing channel");
        let mut members: Vec<String> = match self.channel_source {
            ChannelSource::Conversations => self.conversation_members(channel_id).await?,
            ChannelSource::Channels => self
                .call(METHOD_CHANNELS_INFO, &ApiParams::new().with("channel", channel_id))
                .await?
                .extract(&["channel", "members"])?,
        };
        members.sort();
        members.dedup();

        self.write_set(&key, &members, self.ttl.channel).await?;

        Ok(members)
    }

    /// Every page of `conversations.members`, following `next_cursor`
    async fn conversation_members(&self, channel_id: &str) -> SlackCacheResult<Vec<String>> {
        let mut members = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params = ApiParams::new().with("channel", channel_id);
            if let Some(cursor) = &cursor {
                params = params.with("cursor", cursor);
            }
            let response = self.call(METHOD_CONVERSATIONS_MEMBERS, &params).await?;
            members.extend(response.extract::<Vec<String>>(&["members"])?);

            let next = response
                .lookup(&["response_metadata", "next_cursor"])
                .and_then(Value::as_str)
                .filter(|next| !next.is_empty())
                .map(str::to_string);
            match next {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    warn!(channel_id, cursor = %next, "Slack repeated a page cursor");
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(members)
    }

    async fn profile_field(&self, user_id: &str, field: &str) -> SlackCacheResult<String> {
        let profile = self.profile(user_id).await?;
        profile
            .get(field)
            .map(str::to_string)
            .ok_or_else(|| SlackCacheError::missing_field(user_id, field))
    }

    /// Write hash fields then set the TTL; nothing is written for no fields
    ///
    /// A zero TTL fails before any write so no key is left without expiry.
    async fn write_hash(
        &self,
        key: &str,
        fields: Vec<(String, String)>,
        ttl_seconds: u64,
    ) -> SlackCacheResult<()> {
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidTtl(ttl_seconds).into());
        }
        if fields.is_empty() {
            return Ok(());
        }
        self.store.hset_multiple(key, &fields).await?;
        self.store.expire(key, ttl_seconds).await?;
        Ok(())
    }

    /// Add set members then set the TTL; nothing is written for no members
    async fn write_set(&self, key: &str, members: &[String], ttl_seconds: u64) -> SlackCacheResult<()> {
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidTtl(ttl_seconds).into());
        }
        if members.is_empty() {
            return Ok(());
        }
        self.store.sadd(key, members).await?;
        self.store.expire(key, ttl_seconds).await?;
        Ok(())
    }
}
