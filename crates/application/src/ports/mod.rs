mod block_filter_engine;
mod cache_maintenance_port;
mod cache_store;
mod dns_codec;
mod upstream_resolver;

pub use block_filter_engine::BlockFilterEnginePort;
pub use cache_maintenance_port::{CacheMaintenancePort, CachePurgeOutcome};
pub use cache_store::CacheStore;
pub use dns_codec::{DecodedQuery, DnsCodec};
pub use upstream_resolver::UpstreamResolver;
