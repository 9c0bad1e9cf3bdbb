use async_trait::async_trait;
use ndns_application::ports::{BlockFilterEnginePort, UpstreamResolver};
use ndns_domain::{
    Answer, DomainError, FilterAction, ListDescriptor, ListState, Question, RData, Response,
    ResponseCode,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Upstream answering every question with one A record, or failing on demand.
#[derive(Default)]
pub struct StubUpstream {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let stub = Self::default();
        stub.failing.store(true, Ordering::SeqCst);
        stub
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for StubUpstream {
    async fn query(&self, question: &Question) -> Result<Response, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::UpstreamTimeout {
                server: "stub".to_string(),
            });
        }
        Ok(Response::new(
            0,
            question.clone(),
            ResponseCode::NoError,
            vec![Answer::new(
                &question.name,
                120,
                RData::A("192.0.2.10".parse().unwrap()),
            )],
        ))
    }

    fn endpoint(&self) -> &str {
        "stub://upstream"
    }
}

/// Filter engine that never restricts anything.
pub struct PassAllFilter;

#[async_trait]
impl BlockFilterEnginePort for PassAllFilter {
    async fn check_domain(
        &self,
        _domain: &str,
        _list_name: Option<&str>,
    ) -> Result<FilterAction, DomainError> {
        Ok(FilterAction::Pass)
    }

    async fn load(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        Ok(ListDescriptor::new(name, uri, 60, PathBuf::from("/dev/null")))
    }

    async fn reload(&self) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn check_list(&self, _name: &str) -> Result<Option<ListDescriptor>, DomainError> {
        Ok(None)
    }

    fn default_list(&self) -> ListDescriptor {
        ListDescriptor::new("default", "stub://default", 60, PathBuf::from("/dev/null"))
    }

    fn list_state(&self, _name: &str) -> ListState {
        ListState::Unregistered
    }

    fn known_lists(&self) -> Vec<String> {
        Vec::new()
    }
}
