use std::sync::Arc;

use datecoach_cache::AiResponseCache;
use datecoach_chatbot::ChatbotEngine;
use datecoach_ratelimit::RateLimiter;
use datecoach_redis::RedisConnectionManager;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChatbotEngine>,
    pub limiter: Arc<RateLimiter>,
    pub cache: Arc<AiResponseCache>,
    pub redis: Arc<RedisConnectionManager>,
}

impl AppState {
    pub fn new(
        engine: Arc<ChatbotEngine>,
        limiter: Arc<RateLimiter>,
        cache: Arc<AiResponseCache>,
        redis: Arc<RedisConnectionManager>,
    ) -> Self {
        Self {
            engine,
            limiter,
            cache,
            redis,
        }
    }
}
