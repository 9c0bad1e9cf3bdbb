use ndns_application::ports::BlockFilterEnginePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_SYNC_INTERVAL_SECS: u64 = 86400;

/// Periodically re-downloads every filter list the engine knows about.
///
/// The first tick is consumed up front: startup already preloads the
/// default list, so the first reload happens one interval later.
pub struct BlocklistSyncJob {
    engine: Arc<dyn BlockFilterEnginePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(engine: Arc<dyn BlockFilterEnginePort>) -> Self {
        Self {
            engine,
            interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting filter list sync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.engine.reload().await {
                            Ok(reloaded) => info!(reloaded, "BlocklistSyncJob: reload completed"),
                            Err(e) => error!(error = %e, "BlocklistSyncJob: reload failed"),
                        }
                    }
                }
            }
        });
    }
}
