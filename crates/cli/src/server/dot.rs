use ndns_infrastructure::dns::DotConnectionHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dot_server(
    bind_addr: SocketAddr,
    acceptor: TlsAcceptor,
    handler: Arc<DotConnectionHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(bind_address = %bind_addr, "DoT server listening");

    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DoT server shutting down");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "DoT accept failed");
                    continue;
                }
            },
        };

        let acceptor = acceptor.clone();
        let handler = handler.clone();
        tokio::spawn(async move {
            let peer = peer.to_string();
            let tls_stream =
                match tokio::time::timeout(HANDSHAKE_TIMEOUT, acceptor.accept(stream)).await {
                    Ok(Ok(tls_stream)) => tls_stream,
                    Ok(Err(e)) => {
                        warn!(peer = %peer, error = %e, "DoT handshake failed");
                        return;
                    }
                    Err(_) => {
                        warn!(peer = %peer, "DoT handshake timed out");
                        return;
                    }
                };
            debug!(peer = %peer, "DoT connection established");
            handler.serve(tls_stream, &peer).await;
        });
    }

    Ok(())
}
