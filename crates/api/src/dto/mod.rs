pub mod doh;
pub mod filter;
pub mod stats;
