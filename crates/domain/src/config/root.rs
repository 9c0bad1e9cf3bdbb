use serde::{Deserialize, Serialize};

use super::blocking::BlockingConfig;
use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::tls::TlsConfig;
use super::upstream::UpstreamConfig;
use crate::blocklist::is_valid_list_name;

const LOCAL_CONFIG_PATH: &str = "ndns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ndns/config.toml";

/// Main configuration structure for ndns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream DoH resolver
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// DoT key material
    #[serde(default)]
    pub tls: TlsConfig,

    /// Filter lists
    #[serde(default)]
    pub blocking: BlockingConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ndns.toml in current directory
    /// 3. /etc/ndns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.doh_port {
            self.server.doh_port = port;
        }
        if let Some(port) = overrides.dot_port {
            self.server.dot_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(url) = overrides.upstream_url {
            self.upstream.url = url;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.doh_port == 0 {
            return Err(ConfigError::Validation("DoH port cannot be 0".to_string()));
        }

        if self.server.dot_enabled {
            if self.server.dot_port == 0 {
                return Err(ConfigError::Validation("DoT port cannot be 0".to_string()));
            }
            if self.tls.cert_path.is_none() || self.tls.key_path.is_none() {
                return Err(ConfigError::Validation(
                    "DoT is enabled but tls.cert_path/tls.key_path are not set".to_string(),
                ));
            }
        }

        let url = self.upstream.url.as_str();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "Upstream '{}' is not an http(s) DoH endpoint",
                url
            )));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.blocking.download_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "List download timeout cannot be 0".to_string(),
            ));
        }

        let default_list = &self.blocking.default_list;
        if !is_valid_list_name(&default_list.name) {
            return Err(ConfigError::Validation(format!(
                "Invalid default list name '{}'",
                default_list.name
            )));
        }
        if default_list.ttl == 0 {
            return Err(ConfigError::Validation(
                "Default list TTL cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub doh_port: Option<u16>,
    pub dot_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_url: Option<String>,
    pub log_level: Option<String>,
}
