use async_trait::async_trait;
use ndns_domain::DomainError;

/// Outcome of one purge cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CachePurgeOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Housekeeping hooks for stores that keep expired entries around until
/// something sweeps them.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError>;
}
