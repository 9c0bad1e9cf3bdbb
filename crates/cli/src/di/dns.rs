use ndns_application::ports::CacheStore;
use ndns_domain::Config;
use ndns_infrastructure::dns::{
    DohUpstreamResolver, FilterListEngine, HickoryCodec, MemoryCacheStore,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub cache: Arc<MemoryCacheStore>,
    pub codec: Arc<HickoryCodec>,
    pub upstream: Arc<DohUpstreamResolver>,
    pub filter: Arc<FilterListEngine>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!(upstream = %config.upstream.url, "Initializing DNS services");

        let cache = Arc::new(MemoryCacheStore::new());
        let upstream = Arc::new(DohUpstreamResolver::new(&config.upstream)?);
        let filter = Arc::new(FilterListEngine::new(
            cache.clone() as Arc<dyn CacheStore>,
            &config.blocking,
        )?);

        info!(
            lists_dir = %config.blocking.lists_dir,
            default_list = %config.blocking.default_list.name,
            "Filter list engine ready"
        );

        Ok(Self {
            cache,
            codec: Arc::new(HickoryCodec::new()),
            upstream,
            filter,
        })
    }
}
