use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Directory holding downloaded list bodies, one file per list.
    #[serde(default = "default_lists_dir")]
    pub lists_dir: String,

    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,

    /// Load the default list at startup instead of on first use.
    #[serde(default = "default_true")]
    pub preload_default_list: bool,

    #[serde(default)]
    pub default_list: DefaultListConfig,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            lists_dir: default_lists_dir(),
            download_timeout_secs: default_download_timeout_secs(),
            sync_interval_secs: default_sync_interval_secs(),
            preload_default_list: true,
            default_list: DefaultListConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultListConfig {
    #[serde(default = "default_list_name")]
    pub name: String,

    #[serde(default = "default_list_uri")]
    pub uri: String,

    #[serde(default = "default_list_ttl")]
    pub ttl: u32,
}

impl Default for DefaultListConfig {
    fn default() -> Self {
        Self {
            name: default_list_name(),
            uri: default_list_uri(),
            ttl: default_list_ttl(),
        }
    }
}

fn default_lists_dir() -> String {
    "./lists".to_string()
}

fn default_download_timeout_secs() -> u64 {
    3
}

fn default_sync_interval_secs() -> u64 {
    86400
}

fn default_true() -> bool {
    true
}

fn default_list_name() -> String {
    "default".to_string()
}

fn default_list_uri() -> String {
    "https://raw.githubusercontent.com/hagezi/dns-blocklists/main/domains/light.txt".to_string()
}

fn default_list_ttl() -> u32 {
    86400
}
