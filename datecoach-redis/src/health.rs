use std::future::Future;
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;

use datecoach_core::{now_ms, CoachError, HealthCheck};

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

const LATENCY_EMA_ALPHA: f64 = 0.1;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionHealth {
    pub connected: bool,
    /// Milliseconds since the epoch of the last health probe.
    pub last_check: Option<i64>,
    pub latency_ms: Option<u64>,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisMetrics {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    pub rejected_operations: u64,
    pub average_latency_ms: f64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Connection health plus a consecutive-failure circuit breaker.
///
/// Once `failure_threshold` operations in a row have failed, [`execute`]
/// rejects work without running it. Only a successful [`record_probe`]
/// closes the circuit again.
///
/// [`execute`]: HealthMonitor::execute
/// [`record_probe`]: HealthMonitor::record_probe
#[derive(Debug)]
pub struct HealthMonitor {
    failure_threshold: u32,
    health: RwLock<ConnectionHealth>,
    metrics: Mutex<RedisMetrics>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD)
    }
}

impl HealthMonitor {
    pub fn new(failure_threshold: u32) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            health: RwLock::new(ConnectionHealth::default()),
            metrics: Mutex::new(RedisMetrics::default()),
        }
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }

    pub fn health(&self) -> ConnectionHealth {
        self.health
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn metrics(&self) -> RedisMetrics {
        self.metrics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn circuit_open(&self) -> Option<u32> {
        let health = self.health.read().unwrap_or_else(PoisonError::into_inner);
        let failures = health.consecutive_failures;
        (failures >= self.failure_threshold).then_some(failures)
    }

    /// Runs `operation` unless the circuit is open, recording its outcome.
    pub async fn execute<T, F>(&self, operation: &str, future: F) -> Result<T, CoachError>
    where
        F: Future<Output = Result<T, CoachError>>,
    {
        if let Some(failures) = self.circuit_open() {
            self.with_metrics(|metrics| metrics.rejected_operations += 1);
            tracing::debug!(operation, failures, "redis circuit open, rejecting operation");
            return Err(CoachError::CircuitOpen { failures });
        }

        let started = Instant::now();
        let result = future.await;
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => self.record_success(elapsed),
            Err(error) => self.record_failure(operation, error),
        }
        result
    }

    fn with_metrics(&self, update: impl FnOnce(&mut RedisMetrics)) {
        let mut metrics = self.metrics.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut metrics);
    }

    fn record_success(&self, elapsed: Duration) {
        let latency = elapsed.as_secs_f64() * 1000.0;
        self.with_metrics(|metrics| {
            metrics.total_operations += 1;
            metrics.average_latency_ms = if metrics.successful_operations == 0 {
                latency
            } else {
                LATENCY_EMA_ALPHA * latency + (1.0 - LATENCY_EMA_ALPHA) * metrics.average_latency_ms
            };
            metrics.successful_operations += 1;
        });

        let mut health = self.health.write().unwrap_or_else(PoisonError::into_inner);
        health.consecutive_failures = 0;
    }

    fn record_failure(&self, operation: &str, error: &CoachError) {
        self.with_metrics(|metrics| {
            metrics.total_operations += 1;
            metrics.failed_operations += 1;
        });

        let mut health = self.health.write().unwrap_or_else(PoisonError::into_inner);
        health.consecutive_failures += 1;
        health.last_error = Some(error.to_string());
        if health.consecutive_failures == self.failure_threshold {
            tracing::warn!(
                operation,
                failures = health.consecutive_failures,
                error = %error,
                "redis circuit opened"
            );
        }
    }

    /// Applies the outcome of a health probe. Success is the only way back to
    /// a closed circuit.
    pub fn record_probe(&self, outcome: Result<Duration, String>) {
        let mut health = self.health.write().unwrap_or_else(PoisonError::into_inner);
        health.last_check = Some(now_ms());
        match outcome {
            Ok(latency) => {
                health.connected = true;
                health.consecutive_failures = 0;
                health.latency_ms = Some(latency.as_millis() as u64);
                health.last_error = None;
            }
            Err(message) => {
                health.connected = false;
                health.consecutive_failures += 1;
                health.latency_ms = None;
                health.last_error = Some(message);
            }
        }
    }

    pub fn record_cache_hit(&self) {
        self.with_metrics(|metrics| metrics.cache_hits += 1);
    }

    pub fn record_cache_miss(&self) {
        self.with_metrics(|metrics| metrics.cache_misses += 1);
    }
}

impl HealthCheck for HealthMonitor {
    fn is_healthy(&self) -> bool {
        let health = self.health.read().unwrap_or_else(PoisonError::into_inner);
        health.connected && health.consecutive_failures < self.failure_threshold
    }
}
