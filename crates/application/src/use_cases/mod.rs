pub mod dns;
pub mod filter;

pub use dns::{GetQueryCountUseCase, Resolution, ResolveDnsQueryUseCase};
pub use filter::{CheckDomainUseCase, GetDefaultListUseCase, LoadFilterListUseCase};
