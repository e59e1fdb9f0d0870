//! Test helpers for integration tests
//!
//! Provides a scripted Slack API, a WARN event counter and the wiring that
//! puts `CachedSlack` on top of an in-memory store.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use slack_cache::{CachedSlack, MemoryStore, RedisPool, RedisPoolConfig};
use slack_core::{ApiParams, ApiResponse, CacheStore, SlackApi, TransportError};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub params: ApiParams,
}

/// Scripted `SlackApi`
///
/// Each method answers from a queue of one-shot responses first, then from
/// its standing response. A method with neither fails like a dead connection.
#[derive(Debug, Default)]
pub struct ScriptedSlack {
    standing: Mutex<HashMap<String, Value>>,
    queued: Mutex<HashMap<String, VecDeque<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedSlack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `method` with `response`
    pub fn respond(self, method: &str, response: Value) -> Self {
        self.standing.lock().insert(method.to_string(), response);
        self
    }

    /// Answer the next call to `method` with `response`
    pub fn respond_once(self, method: &str, response: Value) -> Self {
        self.queued
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Calls made to one method
    pub fn calls_to(&self, method: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SlackApi for ScriptedSlack {
    async fn call(&self, method: &str, params: &ApiParams) -> Result<ApiResponse, TransportError> {
        self.calls.lock().push(RecordedCall {
            method: method.to_string(),
            params: params.clone(),
        });

        let queued = self
            .queued
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        let response = queued.or_else(|| self.standing.lock().get(method).cloned());

        match response {
            Some(value) => ApiResponse::from_value(value),
            None => Err(TransportError::Http(format!(
                "connection refused calling {method}"
            ))),
        }
    }
}

/// `CachedSlack` wired to a `MemoryStore` and a `ScriptedSlack`
pub struct TestCache {
    pub cache: CachedSlack,
    pub store: Arc<MemoryStore>,
    pub slack: Arc<ScriptedSlack>,
}

impl TestCache {
    /// Empty store, default prefix
    pub fn new(slack: ScriptedSlack) -> Self {
        Self::with_store(slack, MemoryStore::new())
    }

    /// Pre-seeded store, default prefix
    pub fn with_store(slack: ScriptedSlack, store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let slack = Arc::new(slack);
        let cache = CachedSlack::new(store.clone(), slack.clone());
        Self {
            cache,
            store,
            slack,
        }
    }
}

/// Counts WARN events seen by the subscriber it is installed in
#[derive(Debug, Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Install a subscriber counting into `self` for the current thread
    ///
    /// Events are counted until the returned guard is dropped. Use with a
    /// current-thread runtime so the whole test stays on this thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Connect to the Redis named by `REDIS_URL`, if any
///
/// Returns `None` (and the test should return early) when no Redis is
/// configured or it does not answer a PING.
pub async fn check_redis_env() -> Option<RedisPool> {
    let _ = dotenvy::dotenv();

    let Ok(url) = std::env::var("REDIS_URL") else {
        eprintln!("Skipping test: REDIS_URL not set");
        return None;
    };

    let pool = RedisPool::new(RedisPoolConfig {
        url,
        max_connections: 4,
    })
    .ok()?;

    match pool.health_check().await {
        Ok(()) => Some(pool),
        Err(e) => {
            eprintln!("Skipping test: Redis not reachable: {e}");
            None
        }
    }
}

/// Sorted members of a set, for order-independent assertions
pub async fn sorted_members(store: &dyn CacheStore, key: &str) -> anyhow::Result<Vec<String>> {
    let mut members = store.smembers(key).await?;
    members.sort();
    Ok(members)
}
