use crate::ports::{BlockFilterEnginePort, CacheStore, DnsCodec, UpstreamResolver};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use ndns_domain::cache_key::{answer_key, QUERY_COUNT_KEY};
use ndns_domain::{CacheValue, DnsClass, DomainError, Question, RecordType, Response};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one pass through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub response: Response,
    /// Freshness hint for transports, in seconds.
    pub ttl: u32,
    pub cache_hit: bool,
    pub restricted: bool,
}

/// Cache-aside resolution: decode, cache lookup, upstream on miss, then the
/// optional filter-list check.
pub struct ResolveDnsQueryUseCase {
    codec: Arc<dyn DnsCodec>,
    cache: Arc<dyn CacheStore>,
    upstream: Arc<dyn UpstreamResolver>,
    filter: Arc<dyn BlockFilterEnginePort>,
}

impl ResolveDnsQueryUseCase {
    pub fn new(
        codec: Arc<dyn DnsCodec>,
        cache: Arc<dyn CacheStore>,
        upstream: Arc<dyn UpstreamResolver>,
        filter: Arc<dyn BlockFilterEnginePort>,
    ) -> Self {
        Self {
            codec,
            cache,
            upstream,
            filter,
        }
    }

    pub async fn execute(
        &self,
        wire: &[u8],
        list_name: Option<&str>,
    ) -> Result<Resolution, DomainError> {
        let query = self.codec.decode_query(wire)?;
        let question = query.question;
        let key = answer_key(&question);

        let (response, ttl, cache_hit) = match self.cached_response(&key).await? {
            Some((response, remaining)) => {
                debug!(question = %question, "Cache hit");
                self.on_cached_response().await;
                match remaining {
                    Some(ttl) => (response.with_ttl_ceiling(ttl), ttl, true),
                    None => {
                        let ttl = response.cache_ttl();
                        (response, ttl, true)
                    }
                }
            }
            None => {
                debug!(question = %question, upstream = %self.upstream.endpoint(), "Cache miss");
                let response = self.upstream.query(&question).await.map_err(|e| {
                    warn!(question = %question, error = %e, "Upstream resolution failed");
                    e
                })?;
                let ttl = self.on_response(&key, &response).await;
                (response, ttl, false)
            }
        };

        let mut response = response
            .with_id(query.id)
            .with_question_name(&query.wire_name);
        response.recursion_desired = query.recursion_desired;

        let mut restricted = false;
        if let Some(list) = list_name {
            let action = self.filter.check_domain(&question.name, Some(list)).await?;
            if action.is_restrict() {
                debug!(domain = %question.name, list = %list, "Domain restricted by filter list");
                response = response.restricted();
                restricted = true;
            }
        }

        Ok(Resolution {
            response,
            ttl,
            cache_hit,
            restricted,
        })
    }

    /// Accepts the unpadded base64url `dns` parameter of a DoH GET. Padded
    /// and standard-alphabet input is tolerated.
    pub async fn execute_base64(
        &self,
        encoded: &str,
        list_name: Option<&str>,
    ) -> Result<Resolution, DomainError> {
        let wire = decode_base64(encoded)?;
        self.execute(&wire, list_name).await
    }

    /// Synthesises a recursive query for `name`/`record_type` and runs it
    /// through the pipeline.
    pub async fn resolve_name(
        &self,
        name: &str,
        record_type: RecordType,
        list_name: Option<&str>,
    ) -> Result<Resolution, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Query name is empty".to_string(),
            ));
        }
        let question = Question::new(name, record_type, DnsClass::IN);
        let wire = self.codec.encode_query(fastrand::u16(..), &question)?;
        self.execute(&wire, list_name).await
    }

    pub fn encode(&self, resolution: &Resolution) -> Result<Vec<u8>, DomainError> {
        self.codec.encode_response(&resolution.response)
    }

    async fn cached_response(
        &self,
        key: &str,
    ) -> Result<Option<(Response, Option<u32>)>, DomainError> {
        let entry = self.cache.get_with_ttl(key).await?;
        Ok(entry.and_then(|(value, remaining)| {
            value.into_response().map(|response| (response, remaining))
        }))
    }

    /// Runs after an upstream answer: write it back when cacheable, then count it.
    async fn on_response(&self, key: &str, response: &Response) -> u32 {
        let ttl = response.cache_ttl();
        if ttl > 0 {
            if let Err(e) = self
                .cache
                .set(key, CacheValue::Response(response.clone()), Some(ttl))
                .await
            {
                warn!(key = %key, error = %e, "Failed to cache response");
            }
        }
        self.count_query().await;
        ttl
    }

    async fn on_cached_response(&self) {
        self.count_query().await;
    }

    async fn count_query(&self) {
        if let Err(e) = self.cache.increment(QUERY_COUNT_KEY).await {
            warn!(error = %e, "Failed to increment query counter");
        }
    }
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>, DomainError> {
    let trimmed = encoded.trim().trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| DomainError::MalformedPacket(format!("Invalid base64 query: {}", e)))
}
