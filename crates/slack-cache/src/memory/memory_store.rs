//! In-memory hash/set store with per-key expiry.
//!
//! Mirrors the subset of Redis semantics the cache relies on: hashes and sets
//! live in one keyspace, a key holds exactly one type, and an expired key
//! behaves as if it never existed. Expiry is lazy (checked on access).

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use slack_core::{CacheStore, StoreError, StoreResult};
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum Value {
    Hash(HashMap<String, String>),
    Set(BTreeSet<String>),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Hash(_) => "hash",
            Self::Set(_) => "set",
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Command counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// HGET, HGETALL, SMEMBERS and SISMEMBER calls
    pub reads: u64,
    /// HSET, SADD and EXPIRE calls
    pub writes: u64,
}

/// In-memory `CacheStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    reads: AtomicU64,
    writes: AtomicU64,
}

fn wrong_type(key: &str, found: &Value, wanted: &str) -> StoreError {
    StoreError::Command(format!(
        "WRONGTYPE {key} holds a {}, not a {wanted}",
        found.type_name()
    ))
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Command counters since creation
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }

    /// Whether `key` currently exists (not expired)
    pub fn contains_key(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();
        Self::live(&mut entries, key).is_some()
    }

    /// Remaining time to live; `None` for a missing key or one without expiry
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let mut entries = self.entries.lock();
        let expires_at = Self::live(&mut entries, key)?.expires_at?;
        Some(expires_at.saturating_duration_since(Instant::now()))
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed a hash directly, bypassing the write counter
    pub fn insert_hash<I, F, V>(&self, key: &str, fields: I)
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        let hash = fields
            .into_iter()
            .map(|(f, v)| (f.into(), v.into()))
            .collect();
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: Value::Hash(hash),
                expires_at: None,
            },
        );
    }

    /// Seed a set directly, bypassing the write counter
    pub fn insert_set<I, M>(&self, key: &str, members: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let set = members.into_iter().map(Into::into).collect();
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: Value::Set(set),
                expires_at: None,
            },
        );
    }

    /// Look up a key, evicting it first if it has expired
    fn live<'a>(entries: &'a mut HashMap<String, Entry>, key: &str) -> Option<&'a mut Entry> {
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(key);
        }
        entries.get_mut(key)
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn hget(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        self.count_read();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => Ok(None),
            Some(Entry {
                value: Value::Hash(hash),
                ..
            }) => Ok(hash.get(field).cloned()),
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "hash")),
        }
    }

    async fn hgetall(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        self.count_read();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => Ok(HashMap::new()),
            Some(Entry {
                value: Value::Hash(hash),
                ..
            }) => Ok(hash.clone()),
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "hash")),
        }
    }

    async fn hset_multiple(&self, key: &str, fields: &[(String, String)]) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        self.count_write();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => {
                let hash = fields.iter().cloned().collect();
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: Value::Hash(hash),
                        expires_at: None,
                    },
                );
                Ok(())
            }
            Some(Entry {
                value: Value::Hash(hash),
                ..
            }) => {
                hash.extend(fields.iter().cloned());
                Ok(())
            }
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "hash")),
        }
    }

    async fn smembers(&self, key: &str) -> StoreResult<Vec<String>> {
        self.count_read();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => Ok(Vec::new()),
            Some(Entry {
                value: Value::Set(set),
                ..
            }) => Ok(set.iter().cloned().collect()),
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "set")),
        }
    }

    async fn sismember(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.count_read();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => Ok(false),
            Some(Entry {
                value: Value::Set(set),
                ..
            }) => Ok(set.contains(member)),
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "set")),
        }
    }

    async fn sadd(&self, key: &str, members: &[String]) -> StoreResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        self.count_write();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => {
                let set = members.iter().cloned().collect();
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: Value::Set(set),
                        expires_at: None,
                    },
                );
                Ok(())
            }
            Some(Entry {
                value: Value::Set(set),
                ..
            }) => {
                set.extend(members.iter().cloned());
                Ok(())
            }
            Some(Entry { value, .. }) => Err(wrong_type(key, value, "set")),
        }
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<bool> {
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidTtl(ttl_seconds));
        }
        self.count_write();
        let mut entries = self.entries.lock();
        match Self::live(&mut entries, key) {
            None => Ok(false),
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(ttl_seconds));
                Ok(true)
            }
        }
    }
}
