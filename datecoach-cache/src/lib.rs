//! AI response cache.
//!
//! Responses are stored under a hash of `(messages, model, temperature,
//! maxTokens)` and expire by TTL comparison at read time. Storage goes to a
//! Redis [`CacheBackend`] while the injected [`HealthCheck`] reports healthy,
//! and to the in-process [`MemoryCacheBackend`] otherwise.
//!
//! [`HealthCheck`]: datecoach_core::HealthCheck

mod backend;
mod cache;
pub mod key;
mod memory;
mod model;
mod policy;

pub use backend::{CacheBackend, CacheEntry};
pub use cache::{AiResponseCache, AiResponseCacheBuilder, CacheStats};
pub use key::{cache_key, string_hash, AI_CACHE_PREFIX};
pub use memory::{MemoryCacheBackend, DEFAULT_MAX_ENTRIES};
pub use model::CachedChatModel;
pub use policy::CachePolicy;
