//! ndns domain layer: DNS message model, filter lists, cache keys and configuration.
pub mod blocklist;
pub mod cache_key;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod errors;

pub use blocklist::{is_valid_list_name, normalize_domain, FilterAction, ListDescriptor, ListState};
pub use cache_key::CacheValue;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::Question;
pub use dns_record::{Answer, DnsClass, RData, RecordType};
pub use dns_response::{Response, ResponseCode};
pub use errors::DomainError;
