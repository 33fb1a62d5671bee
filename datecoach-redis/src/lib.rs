//! Redis plumbing for datecoach.
//!
//! [`RedisConnectionManager`] owns the client and a [`HealthMonitor`] that
//! acts as a circuit breaker. The cache and rate-limit backends run every
//! command through the manager, so their failures feed the same health state
//! the tier selection reads.

mod cache;
mod health;
mod health_tests;
mod keys;
mod manager;
mod ratelimit;
mod script;

use fred::error::RedisError;
pub use fred::types::ReconnectPolicy;

use datecoach_core::CoachError;

pub use cache::RedisCacheBackend;
pub use health::{ConnectionHealth, HealthMonitor, RedisMetrics, DEFAULT_FAILURE_THRESHOLD};
pub use keys::validate_key;
pub use manager::{RedisConnectionManager, RedisManagerConfig};
pub use ratelimit::RedisRateLimitBackend;
pub use script::LUA_SLIDING_WINDOW;

pub(crate) fn map_redis_error(error: RedisError) -> CoachError {
    CoachError::Unavailable(format!("redis: {error}"))
}
