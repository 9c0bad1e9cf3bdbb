use crate::ports::BlockFilterEnginePort;
use ndns_domain::{is_valid_list_name, normalize_domain, DomainError, FilterAction};
use std::sync::Arc;

pub struct CheckDomainUseCase {
    filter: Arc<dyn BlockFilterEnginePort>,
}

impl CheckDomainUseCase {
    pub fn new(filter: Arc<dyn BlockFilterEnginePort>) -> Self {
        Self { filter }
    }

    pub async fn execute(
        &self,
        domain: &str,
        list_name: Option<&str>,
    ) -> Result<FilterAction, DomainError> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Domain is empty".to_string(),
            ));
        }
        if let Some(list) = list_name {
            if !is_valid_list_name(list) {
                return Err(DomainError::InvalidFilterList(format!(
                    "Invalid list name '{}'",
                    list
                )));
            }
        }
        self.filter.check_domain(&domain, list_name).await
    }
}
