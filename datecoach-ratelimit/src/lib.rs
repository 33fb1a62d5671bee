//! Per-identifier request limiting.
//!
//! [`RateLimiter`] asks an injected health check whether the shared (Redis)
//! backend is usable and otherwise keeps a sliding-window hit log in process
//! memory. The memory tier is per process: with several instances behind a
//! load balancer each one enforces its own budget while Redis is down.

mod backend;
mod config;
mod limiter;
mod memory;

pub use backend::{RateLimitBackend, RateLimitResult};
pub use config::RateLimitConfig;
pub use limiter::{RateLimiter, RateLimiterBuilder, RATE_LIMIT_PREFIX};
pub use memory::MemoryRateLimiter;
