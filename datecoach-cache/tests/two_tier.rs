use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use datecoach_cache::{
    AiResponseCache, CacheBackend, CacheEntry, CachePolicy, MemoryCacheBackend,
};
use datecoach_core::{ChatRequest, CoachError, HealthCheck, Message, StaticHealth};

#[derive(Default)]
struct FlakyBackend {
    inner: MemoryCacheBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

#[async_trait]
impl CacheBackend for FlakyBackend {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CoachError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoachError::Cache("connection reset".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, entry: &CacheEntry) -> Result<(), CoachError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoachError::Cache("connection reset".to_string()));
        }
        self.inner.set(key, entry).await
    }

    async fn delete(&self, key: &str) -> Result<(), CoachError> {
        self.inner.delete(key).await
    }

    async fn clear(&self) -> Result<(), CoachError> {
        self.inner.clear().await
    }
}

struct Switch(AtomicBool);

impl HealthCheck for Switch {
    fn is_healthy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn request(text: &str) -> ChatRequest {
    ChatRequest::new("test-model", vec![Message::user(text)])
        .with_temperature(0.3)
        .with_max_tokens(250)
}

#[tokio::test]
async fn memory_only_cache_round_trips() {
    let cache = AiResponseCache::memory_only();
    let req = request("Hoe begin ik een gesprek?");

    assert_eq!(cache.get(&req).await, None);
    cache.set(&req, "Stel een open vraag.", None).await;
    assert_eq!(cache.get(&req).await.as_deref(), Some("Stel een open vraag."));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.writes, 1);
}

#[tokio::test]
async fn expired_entries_are_misses() {
    let memory = Arc::new(MemoryCacheBackend::new());
    let cache = AiResponseCache::builder().memory(memory.clone()).build();
    let req = request("tip voor een eerste date");

    cache.set(&req, "Ga wandelen.", Some(Duration::from_millis(20))).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert_eq!(cache.get(&req).await, None);
    assert!(memory.is_empty(), "stale entry should be evicted on read");
}

#[tokio::test]
async fn creative_requests_bypass_the_cache() {
    let cache = AiResponseCache::memory_only();
    let req =
        ChatRequest::new("m", vec![Message::user("schrijf een gedicht")]).with_temperature(0.9);

    cache.set(&req, "rozen zijn rood", None).await;
    assert_eq!(cache.get(&req).await, None);
    assert_eq!(cache.stats().bypassed, 2);
    assert_eq!(cache.stats().writes, 0);
}

#[tokio::test]
async fn healthy_shared_tier_is_used() {
    let redis = Arc::new(FlakyBackend::default());
    let memory = Arc::new(MemoryCacheBackend::new());
    let cache = AiResponseCache::builder()
        .redis(redis.clone(), Arc::new(StaticHealth::healthy()))
        .memory(memory.clone())
        .build();
    let req = request("hallo");

    cache.set(&req, "hoi", None).await;
    assert_eq!(cache.get(&req).await.as_deref(), Some("hoi"));
    assert_eq!(redis.writes.load(Ordering::SeqCst), 1);
    assert_eq!(redis.reads.load(Ordering::SeqCst), 1);
    assert!(memory.is_empty());
}

#[tokio::test]
async fn degraded_health_routes_to_memory() {
    let redis = Arc::new(FlakyBackend::default());
    let memory = Arc::new(MemoryCacheBackend::new());
    let health = Arc::new(Switch(AtomicBool::new(false)));
    let cache = AiResponseCache::builder()
        .redis(redis.clone(), health.clone())
        .memory(memory.clone())
        .build();
    let req = request("hallo");

    cache.set(&req, "hoi", None).await;
    assert_eq!(cache.get(&req).await.as_deref(), Some("hoi"));
    assert_eq!(redis.writes.load(Ordering::SeqCst), 0);
    assert_eq!(memory.len(), 1);

    // Back to healthy: the shared tier has nothing yet.
    health.0.store(true, Ordering::SeqCst);
    assert_eq!(cache.get(&req).await, None);
}

#[tokio::test]
async fn shared_read_errors_are_misses() {
    let redis = Arc::new(FlakyBackend::default());
    redis.fail_reads.store(true, Ordering::SeqCst);
    let cache = AiResponseCache::builder()
        .redis(redis.clone(), Arc::new(StaticHealth::healthy()))
        .build();

    assert_eq!(cache.get(&request("hallo")).await, None);
    assert_eq!(cache.stats().misses, 1);
}

#[tokio::test]
async fn shared_write_errors_fall_back_to_memory() {
    let redis = Arc::new(FlakyBackend::default());
    redis.fail_writes.store(true, Ordering::SeqCst);
    let memory = Arc::new(MemoryCacheBackend::new());
    let cache = AiResponseCache::builder()
        .redis(redis.clone(), Arc::new(StaticHealth::healthy()))
        .memory(memory.clone())
        .build();

    cache.set(&request("hallo"), "hoi", None).await;

    assert_eq!(redis.writes.load(Ordering::SeqCst), 1);
    assert_eq!(memory.len(), 1);
    assert_eq!(cache.stats().writes, 1);
}

#[tokio::test]
async fn clear_only_touches_memory() {
    let redis = Arc::new(FlakyBackend::default());
    let memory = Arc::new(MemoryCacheBackend::new());
    let health = Arc::new(Switch(AtomicBool::new(true)));
    let cache = AiResponseCache::builder()
        .redis(redis.clone(), health.clone())
        .memory(memory.clone())
        .build();
    let req = request("hallo");

    cache.set(&req, "gedeeld", None).await;
    health.0.store(false, Ordering::SeqCst);
    cache.set(&req, "lokaal", None).await;

    cache.clear().await;

    assert!(memory.is_empty());
    assert_eq!(redis.inner.len(), 1);
}

#[tokio::test]
async fn custom_policy_is_respected() {
    let policy = CachePolicy {
        max_messages: 1,
        ..CachePolicy::default()
    };
    let cache = AiResponseCache::builder().policy(policy).build();
    let req = ChatRequest::new("m", vec![Message::system("s"), Message::user("u")]);

    cache.set(&req, "x", None).await;
    assert_eq!(cache.get(&req).await, None);
    assert_eq!(cache.stats().bypassed, 2);
}

#[tokio::test]
async fn unbounded_ttl_keeps_entry_readable() {
    let cache = AiResponseCache::memory_only();
    let req = request("hoe lang blijft dit bewaard");

    cache.set(&req, "voor altijd", Some(Duration::MAX)).await;

    assert_eq!(cache.get(&req).await.as_deref(), Some("voor altijd"));
}
