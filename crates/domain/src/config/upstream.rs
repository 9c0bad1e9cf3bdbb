use serde::{Deserialize, Serialize};

pub const DEFAULT_UPSTREAM_URL: &str = "https://dns.google/dns-query";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// DoH endpoint every query is delegated to.
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Accept invalid upstream certificates. Off unless set explicitly.
    #[serde(default)]
    pub insecure_tls: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
            insecure_tls: false,
        }
    }
}

fn default_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
