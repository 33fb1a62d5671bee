use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::task::JoinHandle;

use datecoach_core::{now_ms, CoachError};

use crate::backend::{RateLimitBackend, RateLimitResult};
use crate::config::RateLimitConfig;

#[derive(Debug)]
struct HitLog {
    window_ms: i64,
    hits: VecDeque<i64>,
}

impl HitLog {
    /// Drops hits at or before `now - window`, the bound the Redis script uses.
    fn trim(&mut self, now: i64) {
        let cutoff = now - self.window_ms;
        while self.hits.front().is_some_and(|&hit| hit <= cutoff) {
            self.hits.pop_front();
        }
    }

    fn is_expired(&self, now: i64) -> bool {
        self.hits
            .back()
            .map_or(true, |&last| last <= now - self.window_ms)
    }
}

/// Sliding-window hit logs kept in process memory. Each key holds at most
/// `limit` timestamps; rejected calls are not recorded.
#[derive(Debug, Default)]
pub struct MemoryRateLimiter {
    logs: DashMap<String, HitLog>,
}

impl MemoryRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn check_at(&self, key: &str, config: &RateLimitConfig, now: i64) -> RateLimitResult {
        let window_ms = config.window_ms();
        let mut log = self.logs.entry(key.to_string()).or_insert_with(|| HitLog {
            window_ms,
            hits: VecDeque::new(),
        });
        log.window_ms = window_ms;
        log.trim(now);

        let count = log.hits.len() as u64;
        let oldest = log.hits.front().copied();
        if count < u64::from(config.limit) {
            log.hits.push_back(now);
        }
        RateLimitResult::from_sliding_window(config, count, oldest, now)
    }

    /// Drops logs whose newest hit has left the window. Returns how many
    /// were removed.
    pub fn sweep(&self, now: i64) -> usize {
        let before = self.logs.len();
        self.logs.retain(|_, log| !log.is_expired(now));
        before.saturating_sub(self.logs.len())
    }

    pub fn spawn_cleanup(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = limiter.sweep(now_ms());
                if removed > 0 {
                    tracing::debug!(removed, remaining = limiter.len(), "swept rate limit logs");
                }
            }
        })
    }
}

#[async_trait]
impl RateLimitBackend for MemoryRateLimiter {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn check(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: i64,
    ) -> Result<RateLimitResult, CoachError> {
        Ok(self.check_at(key, config, now))
    }
}
