use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds between sweeps removing expired entries from the in-memory store.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

fn default_purge_interval_secs() -> u64 {
    60
}
