use ndns_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 60;

/// Sweeps expired entries out of the cache store.
pub struct CacheMaintenanceJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    purge_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheMaintenanceJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            purge_interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, purge_secs: u64) -> Self {
        self.purge_interval_secs = purge_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.purge_interval_secs,
            "Starting cache maintenance job"
        );

        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.purge_interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheMaintenanceJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.maintenance.run_purge_cycle().await {
                            Ok(outcome) if outcome.entries_removed > 0 => {
                                info!(
                                    entries_removed = outcome.entries_removed,
                                    cache_size = outcome.cache_size,
                                    "Cache purge cycle completed"
                                );
                            }
                            Ok(outcome) => debug!(cache_size = outcome.cache_size, "Nothing to purge"),
                            Err(e) => error!(error = %e, "Cache purge cycle failed"),
                        }
                    }
                }
            }
        });
    }
}
