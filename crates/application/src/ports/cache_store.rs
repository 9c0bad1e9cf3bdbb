use async_trait::async_trait;
use ndns_domain::{CacheValue, DomainError};

/// Shared key-value store with per-entry expiry.
///
/// Holds the answer cache, the query counter and the filter-list registry.
/// Concurrent writers to the same key are last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value and its remaining lifetime in seconds
    /// (`None` for entries that never expire).
    async fn get_with_ttl(&self, key: &str)
        -> Result<Option<(CacheValue, Option<u32>)>, DomainError>;

    /// `ttl = None` stores the entry without expiry.
    async fn set(&self, key: &str, value: CacheValue, ttl: Option<u32>)
        -> Result<(), DomainError>;

    /// Atomically increments a counter entry, creating it at 1 when absent.
    async fn increment(&self, key: &str) -> Result<u64, DomainError>;

    async fn get(&self, key: &str) -> Result<Option<CacheValue>, DomainError> {
        Ok(self.get_with_ttl(key).await?.map(|(value, _)| value))
    }

    async fn contains(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_with_ttl(key).await?.is_some())
    }
}
