use clap::Parser;
use ndns_api::{AppState, DnsState, FilterState};
use ndns_domain::CliOverrides;
use ndns_infrastructure::dns::DotConnectionHandler;
use ndns_infrastructure::tls::build_acceptor;
use ndns_jobs::{BlocklistSyncJob, CacheMaintenanceJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ndns")]
#[command(version)]
#[command(about = "ndns - DNS-over-HTTPS and DNS-over-TLS gateway with filter lists")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DoH (HTTP) port
    #[arg(long)]
    doh_port: Option<u16>,

    /// DoT port
    #[arg(long)]
    dot_port: Option<u16>,

    /// Disable the DoT listener
    #[arg(long)]
    no_dot: bool,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream DoH endpoint
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        doh_port: cli.doh_port,
        dot_port: cli.dot_port,
        bind_address: cli.bind.clone(),
        upstream_url: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides, cli.no_dot)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting ndns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let use_cases = di::UseCases::new(&dns_services);

    let shutdown = CancellationToken::new();

    if config.blocking.preload_default_list {
        let load_list = use_cases.load_list.clone();
        let default = config.blocking.default_list.clone();
        tokio::spawn(async move {
            match load_list.execute(&default.uri, &default.name).await {
                Ok(descriptor) => info!(list = %descriptor.name, "Default filter list preloaded"),
                Err(e) => warn!(list = %default.name, error = %e, "Default filter list preload failed"),
            }
        });
    }

    JobRunner::new()
        .with_blocklist_sync(
            BlocklistSyncJob::new(dns_services.filter.clone())
                .with_interval(config.blocking.sync_interval_secs),
        )
        .with_cache_maintenance(
            CacheMaintenanceJob::new(dns_services.cache.clone())
                .with_interval(config.cache.purge_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    if config.server.dot_enabled {
        let acceptor = build_acceptor(&config.tls)?;
        let dot_addr = bootstrap::socket_addr(&config.server.bind_address, config.server.dot_port)?;
        let handler = Arc::new(DotConnectionHandler::new(use_cases.resolve.clone()));
        let dot_shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = server::start_dot_server(dot_addr, acceptor, handler, dot_shutdown).await {
                error!(error = %e, "DoT server error");
            }
        });
    }

    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        ctrl_c_shutdown.cancel();
    });

    let app_state = AppState {
        dns: DnsState {
            resolve: use_cases.resolve,
            query_count: use_cases.query_count,
        },
        filter: FilterState {
            load_list: use_cases.load_list,
            default_list: use_cases.default_list,
            check_domain: use_cases.check_domain,
        },
    };

    let web_addr = bootstrap::socket_addr(&config.server.bind_address, config.server.doh_port)?;
    server::start_web_server(web_addr, app_state, shutdown.clone()).await?;

    shutdown.cancel();
    info!("Server shutdown complete");
    Ok(())
}
