use async_trait::async_trait;
use serde::Serialize;

use datecoach_core::{remaining_secs, CoachError};

use crate::config::RateLimitConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResult {
    pub success: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Milliseconds since the epoch at which the budget frees up.
    pub reset_at: i64,
    /// Whole seconds to wait, set only when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl RateLimitResult {
    pub fn allowed(limit: u32, remaining: u32, reset_at: i64) -> Self {
        Self {
            success: true,
            limit,
            remaining,
            reset_at,
            retry_after: None,
        }
    }

    pub fn rejected(limit: u32, reset_at: i64, now: i64) -> Self {
        Self {
            success: false,
            limit,
            remaining: 0,
            reset_at,
            retry_after: Some(remaining_secs(reset_at, now)),
        }
    }

    /// Interprets a sliding-window reply: `count` requests were already in the
    /// window before this one, the oldest scored at `oldest`.
    pub fn from_sliding_window(
        config: &RateLimitConfig,
        count: u64,
        oldest: Option<i64>,
        now: i64,
    ) -> Self {
        let reset_at = oldest.unwrap_or(now) + config.window_ms();
        let limit = u64::from(config.limit);
        if count < limit {
            let remaining = limit.saturating_sub(count + 1) as u32;
            Self::allowed(config.limit, remaining, reset_at)
        } else {
            Self::rejected(config.limit, reset_at, now)
        }
    }

    /// Reset time in whole seconds since the epoch, for `X-RateLimit-Reset`.
    pub fn reset_secs(&self) -> i64 {
        self.reset_at.div_euclid(1000)
    }
}

#[async_trait]
pub trait RateLimitBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: i64,
    ) -> Result<RateLimitResult, CoachError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn empty_window_allows_with_full_budget_minus_one() {
        let config = RateLimitConfig::chatbot();
        let result = RateLimitResult::from_sliding_window(&config, 0, Some(NOW), NOW);
        assert!(result.success);
        assert_eq!(result.remaining, 19);
        assert_eq!(result.reset_at, NOW + 60_000);
        assert_eq!(result.retry_after, None);
    }

    #[test]
    fn last_slot_leaves_zero_remaining() {
        let config = RateLimitConfig::chatbot();
        let result = RateLimitResult::from_sliding_window(&config, 19, Some(NOW - 30_000), NOW);
        assert!(result.success);
        assert_eq!(result.remaining, 0);
        assert_eq!(result.reset_at, NOW + 30_000);
    }

    #[test]
    fn full_window_rejects_until_oldest_expires() {
        let config = RateLimitConfig::chatbot();
        let result = RateLimitResult::from_sliding_window(&config, 20, Some(NOW - 59_500), NOW);
        assert!(!result.success);
        assert_eq!(result.remaining, 0);
        assert_eq!(result.retry_after, Some(1));
    }

    #[test]
    fn retry_after_rounds_up() {
        let result = RateLimitResult::rejected(5, NOW + 1_001, NOW);
        assert_eq!(result.retry_after, Some(2));
        assert_eq!(result.reset_secs(), (NOW + 1_001) / 1000);
    }
}
