use ndns_domain::config::LoggingConfig;
use ndns_domain::{CliOverrides, Config};
use std::net::{IpAddr, SocketAddr};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn load_config(
    path: Option<&str>,
    overrides: CliOverrides,
    disable_dot: bool,
) -> anyhow::Result<Config> {
    let mut config = Config::load(path, overrides)?;
    if disable_dot {
        config.server.dot_enabled = false;
    }
    config.validate()?;
    Ok(config)
}

/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if config.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }

    info!(level = %config.level, format = %config.format, "Logging initialized");
}

pub fn socket_addr(bind: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", bind, e))?;
    Ok(SocketAddr::new(ip, port))
}
