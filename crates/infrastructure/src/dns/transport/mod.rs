pub mod https;

pub use https::DohUpstreamResolver;
