use serde::{Deserialize, Serialize};

/// Key material for the DoT listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub cert_path: Option<String>,

    #[serde(default)]
    pub key_path: Option<String>,

    /// When set, clients must present a certificate signed by this CA.
    #[serde(default)]
    pub client_ca_path: Option<String>,

    #[serde(default = "default_server_name")]
    pub server_name: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: None,
            key_path: None,
            client_ca_path: None,
            server_name: default_server_name(),
        }
    }
}

fn default_server_name() -> String {
    "localhost".to_string()
}
