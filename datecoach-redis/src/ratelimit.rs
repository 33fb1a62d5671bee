use std::sync::Arc;

use async_trait::async_trait;

use datecoach_core::CoachError;
use datecoach_ratelimit::{RateLimitBackend, RateLimitConfig, RateLimitResult};

use crate::keys::validate_key;
use crate::manager::RedisConnectionManager;
use crate::script::{LoadedScript, LUA_SLIDING_WINDOW};

/// Sliding-window limiter backed by a sorted set per key.
#[derive(Debug)]
pub struct RedisRateLimitBackend {
    manager: Arc<RedisConnectionManager>,
    script: LoadedScript,
}

impl RedisRateLimitBackend {
    pub fn new(manager: Arc<RedisConnectionManager>) -> Self {
        Self {
            manager,
            script: LoadedScript::new(LUA_SLIDING_WINDOW),
        }
    }
}

#[async_trait]
impl RateLimitBackend for RedisRateLimitBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: i64,
    ) -> Result<RateLimitResult, CoachError> {
        let key = validate_key(key)?.to_string();
        let member = format!("{now}:{}", rand::random::<u64>());
        let args = vec![now.to_string(), config.window_ms().to_string(), member];
        let script = &self.script;

        let reply: Vec<i64> = self
            .manager
            .execute("ratelimit.check", |client| async move {
                script.eval(&client, vec![key], args).await
            })
            .await?;

        let &[count, oldest] = reply.as_slice() else {
            return Err(CoachError::Unavailable(format!(
                "unexpected sliding window reply: {reply:?}"
            )));
        };
        Ok(RateLimitResult::from_sliding_window(
            config,
            count.max(0) as u64,
            Some(oldest),
            now,
        ))
    }
}
