//! Health capability shared by the two-tier cache and rate limiter.
//!
//! Components that can run against Redis or against process memory take an
//! `Arc<dyn HealthCheck>` and ask it before every operation which tier to use.

use std::sync::Arc;

pub trait HealthCheck: Send + Sync {
    fn is_healthy(&self) -> bool;
}

impl<T> HealthCheck for Arc<T>
where
    T: HealthCheck + ?Sized,
{
    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }
}

/// Fixed answer, used when no Redis is configured and in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticHealth(pub bool);

impl StaticHealth {
    pub fn healthy() -> Self {
        Self(true)
    }

    pub fn degraded() -> Self {
        Self(false)
    }
}

impl HealthCheck for StaticHealth {
    fn is_healthy(&self) -> bool {
        self.0
    }
}
