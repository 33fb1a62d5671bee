use async_trait::async_trait;
use dashmap::DashMap;

use datecoach_core::{now_ms, CoachError};

use crate::backend::{CacheBackend, CacheEntry};

pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// In-process cache tier. Expired entries are swept once the map grows past
/// `max_entries`.
#[derive(Debug)]
pub struct MemoryCacheBackend {
    entries: DashMap<String, CacheEntry>,
    max_entries: usize,
}

impl Default for MemoryCacheBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry that is no longer fresh at `now`. Returns how many were removed.
    pub fn sweep_expired(&self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "swept expired cache entries");
        }
        removed
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CoachError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, entry: &CacheEntry) -> Result<(), CoachError> {
        self.entries.insert(key.to_string(), entry.clone());
        if self.entries.len() > self.max_entries {
            self.sweep_expired(now_ms());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CoachError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoachError> {
        self.entries.clear();
        Ok(())
    }
}
