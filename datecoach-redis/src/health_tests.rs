#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::health::HealthMonitor;
    use datecoach_core::{CoachError, HealthCheck};

    fn failing() -> Result<(), CoachError> {
        Err(CoachError::Unavailable("connection refused".to_string()))
    }

    #[tokio::test]
    async fn test_new_monitor_is_not_healthy_until_probed() {
        let monitor = HealthMonitor::default();
        assert!(!monitor.is_healthy());

        monitor.record_probe(Ok(Duration::from_millis(2)));
        assert!(monitor.is_healthy());
        let health = monitor.health();
        assert!(health.connected);
        assert_eq!(health.latency_ms, Some(2));
        assert!(health.last_check.is_some());
    }

    #[tokio::test]
    async fn test_circuit_opens_after_threshold_failures() {
        let monitor = HealthMonitor::new(3);
        monitor.record_probe(Ok(Duration::ZERO));

        for _ in 0..3 {
            let err = monitor.execute("op", async { failing() }).await.unwrap_err();
            assert!(matches!(err, CoachError::Unavailable(_)));
        }
        assert!(!monitor.is_healthy());

        let err = monitor
            .execute("op", async { Ok::<_, CoachError>(1) })
            .await
            .unwrap_err();
        assert!(matches!(err, CoachError::CircuitOpen { failures: 3 }));

        let metrics = monitor.metrics();
        assert_eq!(metrics.total_operations, 3);
        assert_eq!(metrics.failed_operations, 3);
        assert_eq!(metrics.rejected_operations, 1);
        assert_eq!(
            monitor.health().last_error.as_deref(),
            Some("Backend unavailable: connection refused")
        );
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failures() {
        let monitor = HealthMonitor::new(3);
        monitor.record_probe(Ok(Duration::ZERO));

        let _ = monitor.execute("op", async { failing() }).await;
        let _ = monitor.execute("op", async { failing() }).await;
        assert_eq!(monitor.health().consecutive_failures, 2);

        monitor
            .execute("op", async { Ok::<_, CoachError>(()) })
            .await
            .unwrap();
        assert_eq!(monitor.health().consecutive_failures, 0);
        assert!(monitor.is_healthy());
    }

    #[tokio::test]
    async fn test_only_successful_probe_closes_circuit() {
        let monitor = HealthMonitor::new(1);
        monitor.record_probe(Ok(Duration::ZERO));
        let _ = monitor.execute("op", async { failing() }).await;
        assert!(!monitor.is_healthy());

        monitor.record_probe(Err("timeout".to_string()));
        assert!(!monitor.is_healthy());
        assert!(!monitor.health().connected);

        monitor.record_probe(Ok(Duration::from_millis(1)));
        assert!(monitor.is_healthy());
        assert_eq!(monitor.health().last_error, None);
    }

    #[tokio::test]
    async fn test_latency_average_is_seeded_then_smoothed() {
        let monitor = HealthMonitor::default();
        monitor
            .execute("op", async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, CoachError>(())
            })
            .await
            .unwrap();
        let seeded = monitor.metrics().average_latency_ms;
        assert!(seeded >= 20.0);

        monitor
            .execute("op", async { Ok::<_, CoachError>(()) })
            .await
            .unwrap();
        let smoothed = monitor.metrics().average_latency_ms;
        assert!(smoothed < seeded);
        assert!(smoothed > seeded * 0.85);
    }

    #[test]
    fn test_cache_counters() {
        let monitor = HealthMonitor::default();
        monitor.record_cache_hit();
        monitor.record_cache_hit();
        monitor.record_cache_miss();
        let metrics = monitor.metrics();
        assert_eq!(metrics.cache_hits, 2);
        assert_eq!(metrics.cache_misses, 1);
    }
}
