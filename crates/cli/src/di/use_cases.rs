use super::DnsServices;
use ndns_application::use_cases::{
    CheckDomainUseCase, GetDefaultListUseCase, GetQueryCountUseCase, LoadFilterListUseCase,
    ResolveDnsQueryUseCase,
};
use std::sync::Arc;

pub struct UseCases {
    pub resolve: Arc<ResolveDnsQueryUseCase>,
    pub query_count: Arc<GetQueryCountUseCase>,
    pub load_list: Arc<LoadFilterListUseCase>,
    pub default_list: Arc<GetDefaultListUseCase>,
    pub check_domain: Arc<CheckDomainUseCase>,
}

impl UseCases {
    pub fn new(services: &DnsServices) -> Self {
        Self {
            resolve: Arc::new(ResolveDnsQueryUseCase::new(
                services.codec.clone(),
                services.cache.clone(),
                services.upstream.clone(),
                services.filter.clone(),
            )),
            query_count: Arc::new(GetQueryCountUseCase::new(services.cache.clone())),
            load_list: Arc::new(LoadFilterListUseCase::new(services.filter.clone())),
            default_list: Arc::new(GetDefaultListUseCase::new(services.filter.clone())),
            check_domain: Arc::new(CheckDomainUseCase::new(services.filter.clone())),
        }
    }
}
