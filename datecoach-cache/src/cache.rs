use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use datecoach_core::{now_ms, ChatRequest, HealthCheck, StaticHealth};

use crate::backend::{CacheBackend, CacheEntry};
use crate::key::cache_key;
use crate::memory::MemoryCacheBackend;
use crate::policy::CachePolicy;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub bypassed: u64,
    pub writes: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    bypassed: AtomicU64,
    writes: AtomicU64,
}

pub struct AiResponseCache {
    redis: Option<Arc<dyn CacheBackend>>,
    memory: Arc<MemoryCacheBackend>,
    health: Arc<dyn HealthCheck>,
    policy: CachePolicy,
    counters: Counters,
}

impl std::fmt::Debug for AiResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiResponseCache")
            .field("redis", &self.redis.as_ref().map(|backend| backend.name()))
            .field("memory_entries", &self.memory.len())
            .field("policy", &self.policy)
            .finish()
    }
}

#[derive(Default)]
pub struct AiResponseCacheBuilder {
    redis: Option<Arc<dyn CacheBackend>>,
    memory: Option<Arc<MemoryCacheBackend>>,
    health: Option<Arc<dyn HealthCheck>>,
    policy: Option<CachePolicy>,
}

impl AiResponseCacheBuilder {
    /// Shared tier, used only while `health` reports healthy.
    pub fn redis(mut self, backend: Arc<dyn CacheBackend>, health: Arc<dyn HealthCheck>) -> Self {
        self.redis = Some(backend);
        self.health = Some(health);
        self
    }

    pub fn memory(mut self, memory: Arc<MemoryCacheBackend>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> AiResponseCache {
        AiResponseCache {
            redis: self.redis,
            memory: self.memory.unwrap_or_default(),
            health: self
                .health
                .unwrap_or_else(|| Arc::new(StaticHealth::degraded())),
            policy: self.policy.unwrap_or_default(),
            counters: Counters::default(),
        }
    }
}

impl AiResponseCache {
    pub fn builder() -> AiResponseCacheBuilder {
        AiResponseCacheBuilder::default()
    }

    pub fn memory_only() -> Self {
        Self::builder().build()
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    fn active(&self) -> (&dyn CacheBackend, bool) {
        match &self.redis {
            Some(redis) if self.health.is_healthy() => (redis.as_ref(), true),
            _ => (self.memory.as_ref() as &dyn CacheBackend, false),
        }
    }

    /// Cached response text for `request`, if a fresh entry exists. Backend
    /// failures are reported as misses.
    pub async fn get(&self, request: &ChatRequest) -> Option<String> {
        if !self.policy.should_cache(request) {
            self.counters.bypassed.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        let key = cache_key(request);
        let (backend, _) = self.active();
        let found = match backend.get(&key).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(backend = backend.name(), error = %err, "cache read failed");
                None
            }
        };

        match found {
            Some(entry) if entry.is_fresh(now_ms()) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %key, backend = backend.name(), "ai cache hit");
                Some(entry.response)
            }
            Some(_) => {
                if let Err(err) = backend.delete(&key).await {
                    tracing::warn!(
                        backend = backend.name(),
                        error = %err,
                        "failed to evict stale cache entry"
                    );
                }
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores `response` under `request`'s key with `ttl` or the policy default.
    /// A failed shared-tier write falls back to memory.
    pub async fn set(&self, request: &ChatRequest, response: &str, ttl: Option<Duration>) {
        if !self.policy.should_cache(request) {
            self.counters.bypassed.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let ttl = ttl.unwrap_or(self.policy.default_ttl);
        let entry = CacheEntry::new(
            response,
            now_ms(),
            u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
        );
        let key = cache_key(request);
        let (backend, shared) = self.active();

        match backend.set(&key, &entry).await {
            Ok(()) => {
                self.counters.writes.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) if shared => {
                tracing::warn!(error = %err, "shared cache write failed, storing in memory");
                if self.memory.set(&key, &entry).await.is_ok() {
                    self.counters.writes.fetch_add(1, Ordering::Relaxed);
                }
            }
            Err(err) => {
                tracing::warn!(backend = backend.name(), error = %err, "cache write failed");
            }
        }
    }

    /// Clears the in-process tier. Shared entries are left to expire.
    pub async fn clear(&self) {
        // The memory backend never fails.
        let _ = self.memory.clear().await;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            bypassed: self.counters.bypassed.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
        }
    }
}
