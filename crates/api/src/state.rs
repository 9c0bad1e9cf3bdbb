use ndns_application::use_cases::{
    CheckDomainUseCase, GetDefaultListUseCase, GetQueryCountUseCase, LoadFilterListUseCase,
    ResolveDnsQueryUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dns: DnsState,
    pub filter: FilterState,
}

#[derive(Clone)]
pub struct DnsState {
    pub resolve: Arc<ResolveDnsQueryUseCase>,
    pub query_count: Arc<GetQueryCountUseCase>,
}

#[derive(Clone)]
pub struct FilterState {
    pub load_list: Arc<LoadFilterListUseCase>,
    pub default_list: Arc<GetDefaultListUseCase>,
    pub check_domain: Arc<CheckDomainUseCase>,
}
