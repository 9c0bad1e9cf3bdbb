pub mod dns;
pub mod tls;
