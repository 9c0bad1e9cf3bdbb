use crate::ports::CacheStore;
use ndns_domain::cache_key::QUERY_COUNT_KEY;
use ndns_domain::DomainError;
use std::sync::Arc;

pub struct GetQueryCountUseCase {
    cache: Arc<dyn CacheStore>,
}

impl GetQueryCountUseCase {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        let value = self.cache.get(QUERY_COUNT_KEY).await?;
        Ok(value.and_then(|v| v.as_counter()).unwrap_or(0))
    }
}
