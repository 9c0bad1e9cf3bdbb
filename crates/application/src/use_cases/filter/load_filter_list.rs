use crate::ports::BlockFilterEnginePort;
use ndns_domain::{is_valid_list_name, DomainError, ListDescriptor};
use std::sync::Arc;
use tracing::info;

pub struct LoadFilterListUseCase {
    filter: Arc<dyn BlockFilterEnginePort>,
}

impl LoadFilterListUseCase {
    pub fn new(filter: Arc<dyn BlockFilterEnginePort>) -> Self {
        Self { filter }
    }

    pub async fn execute(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        let name = name.trim();
        if !is_valid_list_name(name) {
            return Err(DomainError::InvalidFilterList(format!(
                "Invalid list name '{}'",
                name
            )));
        }

        let uri = uri.trim();
        if !(uri.starts_with("https://") || uri.starts_with("http://")) {
            return Err(DomainError::InvalidFilterList(format!(
                "List URI must be http(s): '{}'",
                uri
            )));
        }

        let descriptor = self.filter.load(uri, name).await?;
        info!(list = %descriptor.name, uri = %descriptor.uri, "Filter list loaded");
        Ok(descriptor)
    }
}
