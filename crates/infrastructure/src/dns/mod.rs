pub mod block_filter;
pub mod cache;
pub mod codec;
pub mod server;
pub mod transport;

pub use block_filter::FilterListEngine;
pub use cache::MemoryCacheStore;
pub use codec::HickoryCodec;
pub use server::DotConnectionHandler;
pub use transport::DohUpstreamResolver;
