//! Umbrella crate for datecoach.
//!
//! The engine, cache and rate limiter are always available; backends are
//! behind features (`llm`, `redis`, `postgres`, `server`).

pub use datecoach_cache as cache;
pub use datecoach_chatbot as chatbot;
pub use datecoach_core as core;
pub use datecoach_ratelimit as ratelimit;

#[cfg(feature = "postgres")]
pub use datecoach_chatlog_postgres as chatlog_postgres;
#[cfg(feature = "llm")]
pub use datecoach_llm as llm;
#[cfg(feature = "redis")]
pub use datecoach_redis as redis;
#[cfg(feature = "server")]
pub use datecoach_server as server;

pub mod prelude {
    pub use datecoach_cache::{AiResponseCache, CachedChatModel};
    pub use datecoach_chatbot::{ChatInput, ChatReply, ChatbotEngine, Intent};
    pub use datecoach_core::{ChatModel, ChatRequest, ChatResponse, CoachError, HealthCheck};
    pub use datecoach_ratelimit::{RateLimitConfig, RateLimiter};

    #[cfg(feature = "llm")]
    pub use datecoach_llm::OpenRouterClient;
    #[cfg(feature = "redis")]
    pub use datecoach_redis::{RedisConnectionManager, RedisManagerConfig};
}
