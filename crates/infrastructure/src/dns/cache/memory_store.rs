use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use ndns_application::ports::{CacheMaintenancePort, CachePurgeOutcome, CacheStore};
use ndns_domain::{CacheValue, DomainError};
use rustc_hash::FxBuildHasher;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct StoredEntry {
    value: CacheValue,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn remaining_secs(&self, now: Instant) -> Option<u32> {
        self.expires_at.map(|at| {
            let remaining = at.saturating_duration_since(now);
            // Round up so a live entry never reports 0.
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            secs.min(u64::from(u32::MAX)) as u32
        })
    }
}

/// In-process [`CacheStore`] on a sharded map.
///
/// Expired entries are invisible to readers right away and are removed
/// lazily on access or by [`MemoryCacheStore::purge_expired`].
pub struct MemoryCacheStore {
    entries: DashMap<String, StoredEntry, FxBuildHasher>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Purged expired cache entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get_with_ttl(
        &self,
        key: &str,
    ) -> Result<Option<(CacheValue, Option<u32>)>, DomainError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now) {
                return Ok(Some((entry.value.clone(), entry.remaining_secs(now))));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: CacheValue,
        ttl: Option<u32>,
    ) -> Result<(), DomainError> {
        let expires_at = ttl.map(|secs| Instant::now() + Duration::from_secs(u64::from(secs)));
        self.entries
            .insert(key.to_string(), StoredEntry { value, expires_at });
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, DomainError> {
        let now = Instant::now();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                let current = if entry.is_expired(now) {
                    0
                } else {
                    entry.value.as_counter().ok_or_else(|| {
                        DomainError::CacheStore(format!("Key '{}' does not hold a counter", key))
                    })?
                };
                let next = current + 1;
                entry.value = CacheValue::Counter(next);
                if current == 0 {
                    entry.expires_at = None;
                }
                Ok(next)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredEntry {
                    value: CacheValue::Counter(1),
                    expires_at: None,
                });
                Ok(1)
            }
        }
    }
}

#[async_trait]
impl CacheMaintenancePort for MemoryCacheStore {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError> {
        let entries_removed = self.purge_expired();
        Ok(CachePurgeOutcome {
            entries_removed,
            cache_size: self.len(),
        })
    }
}
