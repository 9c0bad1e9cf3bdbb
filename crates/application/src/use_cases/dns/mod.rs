mod get_query_count;
mod resolve_dns_query;

pub use get_query_count::GetQueryCountUseCase;
pub use resolve_dns_query::{Resolution, ResolveDnsQueryUseCase};
