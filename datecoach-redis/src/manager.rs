use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use fred::interfaces::KeysInterface;
use fred::prelude::*;
use fred::types::ReconnectPolicy;
use tokio::task::JoinHandle;

use datecoach_core::{CoachError, HealthCheck};

use crate::health::{ConnectionHealth, HealthMonitor, RedisMetrics, DEFAULT_FAILURE_THRESHOLD};
use crate::map_redis_error;

const PROBE_KEY: &str = "datecoach:health:probe";

#[derive(Clone, Debug)]
pub struct RedisManagerConfig {
    pub failure_threshold: u32,
    pub health_check_interval: Duration,
    pub connect_timeout: Duration,
    pub probe_timeout: Duration,
    /// How the client re-dials after the connection drops. Recovery to
    /// healthy needs a live connection for the next probe.
    pub reconnect: ReconnectPolicy,
}

impl Default for RedisManagerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            health_check_interval: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            probe_timeout: Duration::from_secs(2),
            reconnect: ReconnectPolicy::new_exponential(0, 100, 30_000, 2),
        }
    }
}

/// Owns the Redis client and its health state. Constructed once at startup
/// and shared through `Arc`.
pub struct RedisConnectionManager {
    client: Option<RedisClient>,
    monitor: Arc<HealthMonitor>,
    config: RedisManagerConfig,
}

impl std::fmt::Debug for RedisConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConnectionManager")
            .field("configured", &self.client.is_some())
            .field("health", &self.monitor.health())
            .finish()
    }
}

impl RedisConnectionManager {
    pub async fn connect(url: &str, config: RedisManagerConfig) -> Result<Arc<Self>, CoachError> {
        let redis_config = RedisConfig::from_url(url).map_err(map_redis_error)?;
        let client = RedisClient::new(redis_config, None, None, Some(config.reconnect.clone()));

        match tokio::time::timeout(config.connect_timeout, client.init()).await {
            Ok(Ok(_)) => {}
            Ok(Err(error)) => return Err(map_redis_error(error)),
            Err(_) => return Err(CoachError::Timeout(config.connect_timeout)),
        }

        let manager = Arc::new(Self {
            client: Some(client),
            monitor: Arc::new(HealthMonitor::new(config.failure_threshold)),
            config,
        });
        manager.health_check().await;
        tracing::info!(healthy = manager.is_healthy(), "redis connected");
        Ok(manager)
    }

    /// A manager with no client. Every operation fails with `Unavailable`
    /// and health stays degraded, so callers use their memory tiers.
    pub fn disconnected() -> Arc<Self> {
        let config = RedisManagerConfig::default();
        Arc::new(Self {
            client: None,
            monitor: Arc::new(HealthMonitor::new(config.failure_threshold)),
            config,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.monitor
    }

    pub fn health(&self) -> ConnectionHealth {
        self.monitor.health()
    }

    pub fn metrics(&self) -> RedisMetrics {
        self.monitor.metrics()
    }

    /// Runs one command against the client through the circuit breaker.
    pub async fn execute<T, F, Fut>(&self, operation: &str, command: F) -> Result<T, CoachError>
    where
        F: FnOnce(RedisClient) -> Fut,
        Fut: Future<Output = Result<T, RedisError>>,
    {
        let Some(client) = &self.client else {
            return Err(CoachError::Unavailable("redis is not configured".to_string()));
        };
        let client = client.clone();
        self.monitor
            .execute(operation, async move { command(client).await.map_err(map_redis_error) })
            .await
    }

    /// Probes the server with a bounded round trip and records the outcome.
    pub async fn health_check(&self) -> bool {
        let Some(client) = &self.client else {
            return false;
        };

        let started = Instant::now();
        let probe = client.get::<Option<String>, _>(PROBE_KEY);
        let outcome = match tokio::time::timeout(self.config.probe_timeout, probe).await {
            Ok(Ok(_)) => Ok(started.elapsed()),
            Ok(Err(error)) => Err(error.to_string()),
            Err(_) => Err(format!("health probe timed out after {:?}", self.config.probe_timeout)),
        };
        if let Err(message) = &outcome {
            tracing::warn!(error = %message, "redis health check failed");
        }
        self.monitor.record_probe(outcome);
        self.is_healthy()
    }

    /// Periodic health probing on `health_check_interval`. Logs transitions.
    pub fn spawn_health_monitor(self: &Arc<Self>) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(manager.config.health_check_interval);
            interval.tick().await;
            loop {
                interval.tick().await;
                let was_healthy = manager.is_healthy();
                let healthy = manager.health_check().await;
                if healthy && !was_healthy {
                    tracing::info!("redis connection recovered");
                } else if !healthy && was_healthy {
                    tracing::warn!("redis connection degraded, using memory fallbacks");
                }
            }
        })
    }
}

impl HealthCheck for RedisConnectionManager {
    fn is_healthy(&self) -> bool {
        self.client.is_some() && self.monitor.is_healthy()
    }
}
