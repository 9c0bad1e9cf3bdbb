use async_trait::async_trait;
use ndns_domain::{DomainError, Question, Response};

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Resolves a single question against the configured endpoint.
    ///
    /// Fails with one of the `Upstream*` errors; never retries.
    async fn query(&self, question: &Question) -> Result<Response, DomainError>;

    fn endpoint(&self) -> &str;
}
