//! Upstream resolution over DNS-over-HTTPS (RFC 8484), GET variant.
//!
//! ```text
//! GET /dns-query?dns=<base64url(query)> HTTP/1.1
//! Accept: application/dns-message
//! ```

use crate::dns::codec::HickoryCodec;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ndns_application::ports::{DnsCodec, UpstreamResolver};
use ndns_domain::config::UpstreamConfig;
use ndns_domain::{DomainError, Question, Response};
use std::time::Duration;
use tracing::{debug, warn};

pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Query id sent upstream. RFC 8484 §4.1 recommends 0 so GET requests stay cacheable.
const UPSTREAM_QUERY_ID: u16 = 0;

pub struct DohUpstreamResolver {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
    codec: HickoryCodec,
}

impl DohUpstreamResolver {
    pub fn new(config: &UpstreamConfig) -> Result<Self, DomainError> {
        let timeout = Duration::from_millis(config.timeout_ms);

        if config.insecure_tls {
            warn!(url = %config.url, "Upstream TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("ndns/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_max_idle_per_host(4)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| DomainError::UpstreamTransport {
                server: config.url.clone(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            url: config.url.clone(),
            timeout,
            client,
            codec: HickoryCodec::new(),
        })
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.url.clone(),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> DomainError {
        if error.is_timeout() {
            return self.timeout_error();
        }
        DomainError::UpstreamTransport {
            server: self.url.clone(),
            reason: error.to_string(),
        }
    }
}

#[async_trait]
impl UpstreamResolver for DohUpstreamResolver {
    async fn query(&self, question: &Question) -> Result<Response, DomainError> {
        let query = self.codec.encode_query(UPSTREAM_QUERY_ID, question)?;
        let encoded = URL_SAFE_NO_PAD.encode(&query);

        debug!(url = %self.url, question = %question, "Sending DoH query");

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .get(&self.url)
                .query(&[("dns", encoded.as_str())])
                .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .send(),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamTransport {
                server: self.url.clone(),
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.transport_error(e))?;

        let parsed = self
            .codec
            .decode_response(&body)
            .map_err(|e| DomainError::UpstreamMalformedResponse {
                server: self.url.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            url = %self.url,
            rcode = %parsed.rcode,
            answers = parsed.answers.len(),
            "DoH response received"
        );

        Ok(parsed)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
