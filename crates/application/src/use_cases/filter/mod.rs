mod check_domain;
mod get_default_list;
mod load_filter_list;

pub use check_domain::CheckDomainUseCase;
pub use get_default_list::GetDefaultListUseCase;
pub use load_filter_list::LoadFilterListUseCase;
