//! HTTP surface of the gateway: DoH endpoints (RFC 8484) plus a small JSON
//! API for filter lists and counters.
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use routes::{create_api_routes, create_app, create_doh_routes};
pub use state::{AppState, DnsState, FilterState};
