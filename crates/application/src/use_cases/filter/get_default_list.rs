use crate::ports::BlockFilterEnginePort;
use ndns_domain::ListDescriptor;
use std::sync::Arc;

pub struct GetDefaultListUseCase {
    filter: Arc<dyn BlockFilterEnginePort>,
}

impl GetDefaultListUseCase {
    pub fn new(filter: Arc<dyn BlockFilterEnginePort>) -> Self {
        Self { filter }
    }

    pub fn execute(&self) -> ListDescriptor {
        self.filter.default_list()
    }
}
