#![allow(dead_code)]

use async_trait::async_trait;
use ndns_application::ports::{BlockFilterEnginePort, CacheMaintenancePort, CachePurgeOutcome};
use ndns_domain::{DomainError, FilterAction, ListDescriptor, ListState};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct MockCacheMaintenancePort {
    purge_calls: AtomicU64,
    should_fail: AtomicBool,
    outcome: CachePurgeOutcome,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            purge_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
            outcome: CachePurgeOutcome::default(),
        }
    }

    pub fn with_outcome(mut self, outcome: CachePurgeOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn purge_call_count(&self) -> u64 {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::CacheStore("purge failed".to_string()));
        }
        Ok(self.outcome.clone())
    }
}

pub struct MockFilterEngine {
    reload_calls: AtomicU64,
    should_fail: AtomicBool,
}

impl MockFilterEngine {
    pub fn new() -> Self {
        Self {
            reload_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn reload_call_count(&self) -> u64 {
        self.reload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockFilterEnginePort for MockFilterEngine {
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
        self.reload_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DownloadFailure {
                name: "default".to_string(),
                reason: "unreachable".to_string(),
            });
        }
        Ok(1)
    }

    async fn check_list(&self, _name: &str) -> Result<Option<ListDescriptor>, DomainError> {
        Ok(None)
    }

    fn default_list(&self) -> ListDescriptor {
        ListDescriptor::new("default", "mock://default", 60, PathBuf::from("/dev/null"))
    }

    fn list_state(&self, _name: &str) -> ListState {
        ListState::Unregistered
    }

    fn known_lists(&self) -> Vec<String> {
        Vec::new()
    }
}
