//! TLS material for the DoT listener.

use ndns_domain::config::TlsConfig;
use ndns_domain::DomainError;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;
use tracing::info;

/// ALPN id for DNS over TLS (RFC 7858).
const DOT_ALPN: &[u8] = b"dot";

/// Installs the process-wide rustls crypto provider. Safe to call repeatedly.
pub fn ensure_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::TlsConfig(format!("Cannot open certificate {}: {}", path, e)))?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DomainError::TlsConfig(format!("Invalid certificate {}: {}", path, e)))?;
    if certs.is_empty() {
        return Err(DomainError::TlsConfig(format!(
            "No certificate found in {}",
            path
        )));
    }
    Ok(certs)
}

fn load_key(path: &str) -> Result<PrivateKeyDer<'static>, DomainError> {
    let file = File::open(path)
        .map_err(|e| DomainError::TlsConfig(format!("Cannot open private key {}: {}", path, e)))?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .map_err(|e| DomainError::TlsConfig(format!("Invalid private key {}: {}", path, e)))?
        .ok_or_else(|| DomainError::TlsConfig(format!("No private key found in {}", path)))
}

/// Builds the server-side TLS configuration.
///
/// Client certificates are not requested unless `client_ca_path` is set, in
/// which case every client must present one signed by that CA.
pub fn load_server_config(config: &TlsConfig) -> Result<Arc<ServerConfig>, DomainError> {
    ensure_crypto_provider();

    let cert_path = config
        .cert_path
        .as_deref()
        .ok_or_else(|| DomainError::TlsConfig("tls.cert_path is not set".to_string()))?;
    let key_path = config
        .key_path
        .as_deref()
        .ok_or_else(|| DomainError::TlsConfig("tls.key_path is not set".to_string()))?;

    let certs = load_certs(cert_path)?;
    let key = load_key(key_path)?;

    let builder = ServerConfig::builder();
    let builder = match config.client_ca_path.as_deref() {
        Some(ca_path) => {
            let mut roots = RootCertStore::empty();
            for cert in load_certs(ca_path)? {
                roots.add(cert).map_err(|e| {
                    DomainError::TlsConfig(format!("Invalid client CA {}: {}", ca_path, e))
                })?;
            }
            let verifier = WebPkiClientVerifier::builder(Arc::new(roots))
                .build()
                .map_err(|e| DomainError::TlsConfig(format!("Client verifier: {}", e)))?;
            info!(ca = %ca_path, "DoT client certificate verification enabled");
            builder.with_client_cert_verifier(verifier)
        }
        None => builder.with_no_client_auth(),
    };

    let mut server_config = builder
        .with_single_cert(certs, key)
        .map_err(|e| DomainError::TlsConfig(format!("Certificate/key mismatch: {}", e)))?;
    server_config.alpn_protocols = vec![DOT_ALPN.to_vec()];

    Ok(Arc::new(server_config))
}

pub fn build_acceptor(config: &TlsConfig) -> Result<TlsAcceptor, DomainError> {
    Ok(TlsAcceptor::from(load_server_config(config)?))
}
