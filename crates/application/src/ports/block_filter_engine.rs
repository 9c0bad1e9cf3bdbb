use async_trait::async_trait;
use ndns_domain::{DomainError, FilterAction, ListDescriptor, ListState};

#[async_trait]
pub trait BlockFilterEnginePort: Send + Sync {
    /// Decides whether `domain` may be answered for `list_name`.
    ///
    /// An unregistered list answers `Pass` immediately and schedules a
    /// background refresh; the caller never waits for a download.
    async fn check_domain(
        &self,
        domain: &str,
        list_name: Option<&str>,
    ) -> Result<FilterAction, DomainError>;

    /// Downloads, imports and registers a list. Registration happens only
    /// after the whole body has been imported.
    async fn load(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError>;

    /// Re-downloads every known list plus the default list. Returns how many
    /// were refreshed; fails only when none of them could be.
    async fn reload(&self) -> Result<usize, DomainError>;

    async fn check_list(&self, name: &str) -> Result<Option<ListDescriptor>, DomainError>;

    fn default_list(&self) -> ListDescriptor;

    fn list_state(&self, name: &str) -> ListState;

    /// Names of every list this engine has seen, in no particular order.
    fn known_lists(&self) -> Vec<String>;
}
