use std::sync::Arc;

use datecoach_core::{now_ms, HealthCheck, StaticHealth};

use crate::backend::{RateLimitBackend, RateLimitResult};
use crate::config::RateLimitConfig;
use crate::memory::MemoryRateLimiter;

pub const RATE_LIMIT_PREFIX: &str = "ratelimit:";

pub struct RateLimiter {
    shared: Option<Arc<dyn RateLimitBackend>>,
    health: Arc<dyn HealthCheck>,
    memory: Arc<MemoryRateLimiter>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("shared", &self.shared.as_ref().map(|backend| backend.name()))
            .field("memory_windows", &self.memory.len())
            .finish()
    }
}

#[derive(Default)]
pub struct RateLimiterBuilder {
    shared: Option<Arc<dyn RateLimitBackend>>,
    health: Option<Arc<dyn HealthCheck>>,
    memory: Option<Arc<MemoryRateLimiter>>,
}

impl RateLimiterBuilder {
    pub fn shared(
        mut self,
        backend: Arc<dyn RateLimitBackend>,
        health: Arc<dyn HealthCheck>,
    ) -> Self {
        self.shared = Some(backend);
        self.health = Some(health);
        self
    }

    pub fn memory(mut self, memory: Arc<MemoryRateLimiter>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn build(self) -> RateLimiter {
        RateLimiter {
            shared: self.shared,
            health: self
                .health
                .unwrap_or_else(|| Arc::new(StaticHealth::degraded())),
            memory: self.memory.unwrap_or_default(),
        }
    }
}

impl RateLimiter {
    pub fn builder() -> RateLimiterBuilder {
        RateLimiterBuilder::default()
    }

    pub fn memory_only() -> Self {
        Self::builder().build()
    }

    pub fn memory(&self) -> &Arc<MemoryRateLimiter> {
        &self.memory
    }

    /// Counts one request for `identifier` against `config`. Never fails: a
    /// shared-backend error is logged and the memory window decides.
    pub async fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitResult {
        let key = format!("{RATE_LIMIT_PREFIX}{identifier}");
        let now = now_ms();

        let result = match &self.shared {
            Some(shared) if self.health.is_healthy() => {
                match shared.check(&key, config, now).await {
                    Ok(result) => result,
                    Err(err) => {
                        tracing::warn!(
                            backend = shared.name(),
                            error = %err,
                            "rate limit check failed, using memory window"
                        );
                        self.memory.check_at(&key, config, now)
                    }
                }
            }
            _ => self.memory.check_at(&key, config, now),
        };

        if !result.success {
            tracing::info!(
                identifier = %identifier,
                limit = config.limit,
                retry_after = result.retry_after.unwrap_or_default(),
                "rate limit exceeded"
            );
        }
        result
    }
}
