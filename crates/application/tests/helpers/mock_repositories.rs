#![allow(dead_code)]

use async_trait::async_trait;
use ndns_application::ports::{
    BlockFilterEnginePort, CacheStore, DecodedQuery, DnsCodec, UpstreamResolver,
};
use ndns_domain::{
    Answer, CacheValue, DnsClass, DomainError, FilterAction, ListDescriptor, ListState, Question,
    RData, RecordType, Response, ResponseCode,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Text codec: queries are `id|name|type`, responses are JSON.
pub struct MockCodec;

impl MockCodec {
    pub fn query(id: u16, name: &str, record_type: &str) -> Vec<u8> {
        format!("{}|{}|{}", id, name, record_type).into_bytes()
    }
}

impl DnsCodec for MockCodec {
    fn decode_query(&self, bytes: &[u8]) -> Result<DecodedQuery, DomainError> {
        let malformed = || DomainError::MalformedPacket("mock: bad query".to_string());
        let text = std::str::from_utf8(bytes).map_err(|_| malformed())?;
        let mut parts = text.split('|');
        let id = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(malformed)?;
        let name = parts.next().ok_or_else(malformed)?;
        let record_type = parts
            .next()
            .and_then(|p| RecordType::from_str(p).ok())
            .ok_or_else(malformed)?;
        Ok(DecodedQuery {
            id,
            recursion_desired: true,
            question: Question::new(name, record_type, DnsClass::IN),
            wire_name: name.trim_end_matches('.').to_string(),
        })
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<Response, DomainError> {
        serde_json::from_slice(bytes).map_err(|e| DomainError::MalformedPacket(e.to_string()))
    }

    fn encode_query(&self, id: u16, question: &Question) -> Result<Vec<u8>, DomainError> {
        Ok(Self::query(id, &question.name, question.record_type.as_str()))
    }

    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, DomainError> {
        if response.answers.iter().any(|a| !a.is_consistent()) {
            return Err(DomainError::EncodingError("mock: inconsistent rdata".to_string()));
        }
        serde_json::to_vec(response).map_err(|e| DomainError::EncodingError(e.to_string()))
    }
}

#[derive(Default)]
pub struct MockCacheStore {
    entries: Mutex<HashMap<String, (CacheValue, Option<u32>)>>,
    set_calls: AtomicUsize,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn entry(&self, key: &str) -> Option<(CacheValue, Option<u32>)> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: CacheValue, ttl: Option<u32>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl));
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get_with_ttl(
        &self,
        key: &str,
    ) -> Result<Option<(CacheValue, Option<u32>)>, DomainError> {
        Ok(self.entry(key))
    }

    async fn set(
        &self,
        key: &str,
        value: CacheValue,
        ttl: Option<u32>,
    ) -> Result<(), DomainError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.insert(key, value, ttl);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, DomainError> {
        let mut entries = self.entries.lock().unwrap();
        let next = entries
            .get(key)
            .and_then(|(value, _)| value.as_counter())
            .unwrap_or(0)
            + 1;
        entries.insert(key.to_string(), (CacheValue::Counter(next), None));
        Ok(next)
    }
}

#[derive(Default)]
pub struct MockUpstreamResolver {
    responses: Mutex<HashMap<String, Response>>,
    errors: Mutex<HashMap<String, DomainError>>,
    calls: AtomicUsize,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, name: &str, response: Response) {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), response);
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.errors.lock().unwrap().insert(name.to_string(), error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn query(&self, question: &Question) -> Result<Response, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.errors.lock().unwrap().get(&*question.name) {
            return Err(error.clone());
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&*question.name)
            .cloned()
            .unwrap_or_else(|| Response::new(0, question.clone(), ResponseCode::NxDomain, vec![])))
    }

    fn endpoint(&self) -> &str {
        "mock://upstream"
    }
}

pub struct MockBlockFilterEngine {
    blocked: Mutex<HashSet<(String, String)>>,
    registered: Mutex<HashSet<String>>,
    loads: Mutex<Vec<(String, String)>>,
}

impl MockBlockFilterEngine {
    pub fn new() -> Self {
        Self {
            blocked: Mutex::new(HashSet::new()),
            registered: Mutex::new(HashSet::new()),
            loads: Mutex::new(Vec::new()),
        }
    }

    pub fn block(&self, list: &str, domain: &str) {
        self.registered.lock().unwrap().insert(list.to_string());
        self.blocked
            .lock()
            .unwrap()
            .insert((list.to_string(), domain.to_string()));
    }

    pub fn loads(&self) -> Vec<(String, String)> {
        self.loads.lock().unwrap().clone()
    }
}

impl Default for MockBlockFilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlockFilterEnginePort for MockBlockFilterEngine {
    async fn check_domain(
        &self,
        domain: &str,
        list_name: Option<&str>,
    ) -> Result<FilterAction, DomainError> {
        let Some(list) = list_name else {
            return Ok(FilterAction::Pass);
        };
        let blocked = self
            .blocked
            .lock()
            .unwrap()
            .contains(&(list.to_string(), domain.to_string()));
        Ok(if blocked {
            FilterAction::Restrict
        } else {
            FilterAction::Pass
        })
    }

    async fn load(&self, uri: &str, name: &str) -> Result<ListDescriptor, DomainError> {
        self.loads
            .lock()
            .unwrap()
            .push((uri.to_string(), name.to_string()));
        self.registered.lock().unwrap().insert(name.to_string());
        Ok(ListDescriptor::new(
            name,
            uri,
            86400,
            PathBuf::from(format!("/tmp/{}.txt", name)),
        ))
    }

    async fn reload(&self) -> Result<usize, DomainError> {
        Ok(self.registered.lock().unwrap().len())
    }

    async fn check_list(&self, name: &str) -> Result<Option<ListDescriptor>, DomainError> {
        Ok(self
            .registered
            .lock()
            .unwrap()
            .contains(name)
            .then(|| ListDescriptor::new(name, "mock://list", 86400, PathBuf::from("/tmp/list"))))
    }

    fn default_list(&self) -> ListDescriptor {
        ListDescriptor::new(
            "default",
            "https://lists.test/default.txt",
            86400,
            PathBuf::from("/tmp/default.txt"),
        )
    }

    fn list_state(&self, name: &str) -> ListState {
        if self.registered.lock().unwrap().contains(name) {
            ListState::Registered
        } else {
            ListState::Unregistered
        }
    }

    fn known_lists(&self) -> Vec<String> {
        self.registered.lock().unwrap().iter().cloned().collect()
    }
}

pub fn a_response(name: &str, ttls: &[u32]) -> Response {
    let answers = ttls
        .iter()
        .enumerate()
        .map(|(i, ttl)| {
            Answer::new(
                name,
                *ttl,
                RData::A(std::net::Ipv4Addr::new(192, 0, 2, i as u8 + 1)),
            )
        })
        .collect();
    Response::new(
        0,
        Question::internet(name, RecordType::A),
        ResponseCode::NoError,
        answers,
    )
}

pub struct Harness {
    pub cache: Arc<MockCacheStore>,
    pub upstream: Arc<MockUpstreamResolver>,
    pub filter: Arc<MockBlockFilterEngine>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(MockCacheStore::new()),
            upstream: Arc::new(MockUpstreamResolver::new()),
            filter: Arc::new(MockBlockFilterEngine::new()),
        }
    }

    pub fn use_case(&self) -> ndns_application::use_cases::ResolveDnsQueryUseCase {
        ndns_application::use_cases::ResolveDnsQueryUseCase::new(
            Arc::new(MockCodec),
            self.cache.clone(),
            self.upstream.clone(),
            self.filter.clone(),
        )
    }
}
