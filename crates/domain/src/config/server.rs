use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Plain HTTP port serving the DoH routes.
    #[serde(default = "default_doh_port")]
    pub doh_port: u16,

    #[serde(default = "default_dot_port")]
    pub dot_port: u16,

    #[serde(default = "default_true")]
    pub dot_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            doh_port: default_doh_port(),
            dot_port: default_dot_port(),
            dot_enabled: true,
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_doh_port() -> u16 {
    3000
}

fn default_dot_port() -> u16 {
    853
}

fn default_true() -> bool {
    true
}
