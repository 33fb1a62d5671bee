use std::sync::Arc;

use async_trait::async_trait;
use fred::interfaces::KeysInterface;
use fred::types::Expiration;

use datecoach_cache::{CacheBackend, CacheEntry};
use datecoach_core::{now_ms, CoachError};

use crate::keys::validate_key;
use crate::manager::RedisConnectionManager;

/// Cache entries as JSON strings with a server-side `EX` expiry.
#[derive(Clone, Debug)]
pub struct RedisCacheBackend {
    manager: Arc<RedisConnectionManager>,
}

impl RedisCacheBackend {
    pub fn new(manager: Arc<RedisConnectionManager>) -> Self {
        Self { manager }
    }
}

/// Whole seconds for `EX`, rounded up and never zero.
fn expiry_secs(ttl_ms: u64) -> i64 {
    i64::try_from(ttl_ms.div_ceil(1000).max(1)).unwrap_or(i64::MAX)
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CoachError> {
        let key = validate_key(key)?.to_string();
        let payload = self
            .manager
            .execute("cache.get", |client| async move {
                client.get::<Option<String>, _>(key).await
            })
            .await?;

        let entry = payload
            .map(|raw| serde_json::from_str::<CacheEntry>(&raw))
            .transpose()?;
        match &entry {
            Some(entry) if entry.is_fresh(now_ms()) => self.manager.monitor().record_cache_hit(),
            _ => self.manager.monitor().record_cache_miss(),
        }
        Ok(entry)
    }

    async fn set(&self, key: &str, entry: &CacheEntry) -> Result<(), CoachError> {
        let key = validate_key(key)?.to_string();
        let payload = serde_json::to_string(entry)?;
        let expiry = Expiration::EX(expiry_secs(entry.ttl));
        self.manager
            .execute("cache.set", |client| async move {
                client
                    .set::<(), _, _>(key, payload, Some(expiry), None, false)
                    .await
            })
            .await
    }

    async fn delete(&self, key: &str) -> Result<(), CoachError> {
        let key = validate_key(key)?.to_string();
        self.manager
            .execute("cache.delete", |client| async move {
                client.del::<i64, _>(key).await.map(|_| ())
            })
            .await
    }

    /// Redis entries are left to expire on their own.
    async fn clear(&self) -> Result<(), CoachError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::expiry_secs;

    #[test]
    fn expiry_rounds_up_to_whole_seconds() {
        assert_eq!(expiry_secs(3_600_000), 3600);
        assert_eq!(expiry_secs(1_500), 2);
        assert_eq!(expiry_secs(1), 1);
        assert_eq!(expiry_secs(0), 1);
    }
}
