use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use datecoach_core::CoachError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub response: String,
    /// Write time, milliseconds since the epoch.
    pub timestamp: i64,
    /// Time to live in milliseconds.
    pub ttl: u64,
}

impl CacheEntry {
    pub fn new(response: impl Into<String>, timestamp: i64, ttl: u64) -> Self {
        Self {
            response: response.into(),
            timestamp,
            ttl,
        }
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl).unwrap_or(i64::MAX)
    }

    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) < self.ttl_ms()
    }

    pub fn expires_at(&self) -> i64 {
        self.timestamp.saturating_add(self.ttl_ms())
    }
}

/// Raw storage for cache entries. Freshness is checked by the caller.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CoachError>;

    async fn set(&self, key: &str, entry: &CacheEntry) -> Result<(), CoachError>;

    async fn delete(&self, key: &str) -> Result<(), CoachError>;

    async fn clear(&self) -> Result<(), CoachError>;
}

#[cfg(test)]
mod tests {
    use super::CacheEntry;

    #[test]
    fn freshness_is_ttl_bounded() {
        let entry = CacheEntry::new("hoi", 1_000, 500);
        assert!(entry.is_fresh(1_499));
        assert!(!entry.is_fresh(1_500));
        assert_eq!(entry.expires_at(), 1_500);
    }

    #[test]
    fn huge_ttl_saturates_instead_of_wrapping() {
        let entry = CacheEntry::new("hoi", 1_000, u64::MAX);
        assert!(entry.is_fresh(1_001));
        assert!(entry.is_fresh(i64::MAX));
        assert_eq!(entry.expires_at(), i64::MAX);
    }
}
