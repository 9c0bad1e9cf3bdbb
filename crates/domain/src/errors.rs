use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS packet: {0}")]
    MalformedPacket(String),

    #[error("Failed to encode DNS message: {0}")]
    EncodingError(String),

    #[error("Upstream timeout querying {server}")]
    UpstreamTimeout { server: String },

    #[error("Upstream transport error from {server}: {reason}")]
    UpstreamTransport { server: String, reason: String },

    #[error("Malformed response from upstream {server}: {reason}")]
    UpstreamMalformedResponse { server: String, reason: String },

    #[error("Unsupported content type '{0}', expected application/dns-message")]
    ContentTypeError(String),

    #[error("Filter list not registered: {0}")]
    ListUnavailable(String),

    #[error("Failed to download filter list '{name}': {reason}")]
    DownloadFailure { name: String, reason: String },

    #[error("Invalid filter list: {0}")]
    InvalidFilterList(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Cache store error: {0}")]
    CacheStore(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("TLS configuration error: {0}")]
    TlsConfig(String),
}

impl DomainError {
    /// True for every failure reported by the upstream resolver.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamTimeout { .. }
                | DomainError::UpstreamTransport { .. }
                | DomainError::UpstreamMalformedResponse { .. }
        )
    }

    /// Client-side faults: the request itself can never succeed.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedPacket(_)
                | DomainError::ContentTypeError(_)
                | DomainError::InvalidDomainName(_)
                | DomainError::InvalidRecordType(_)
                | DomainError::InvalidFilterList(_)
        )
    }
}
