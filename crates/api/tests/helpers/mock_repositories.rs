#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use ndns_api::{create_app, AppState, DnsState, FilterState};
use ndns_application::ports::{BlockFilterEnginePort, DnsCodec, UpstreamResolver};
use ndns_application::use_cases::{
    CheckDomainUseCase, GetDefaultListUseCase, GetQueryCountUseCase, LoadFilterListUseCase,
    ResolveDnsQueryUseCase,
};
use ndns_domain::{
    Answer, DomainError, FilterAction, ListDescriptor, ListState, Question, RData, RecordType,
    Response as DnsResponse, ResponseCode,
};
use ndns_infrastructure::dns::{HickoryCodec, MemoryCacheStore};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Answers `A 192.0.2.1` with TTL 300 unless a name has been scripted.
pub struct MockUpstream {
    calls: AtomicUsize,
    errors: Mutex<HashMap<String, DomainError>>,
    nxdomain: Mutex<HashSet<String>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            errors: Mutex::new(HashMap::new()),
            nxdomain: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail(&self, name: &str, error: DomainError) {
        self.errors.lock().unwrap().insert(name.to_string(), error);
    }

    pub fn nxdomain(&self, name: &str) {
        self.nxdomain.lock().unwrap().insert(name.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstream {
    async fn query(&self, question: &Question) -> Result<DnsResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.errors.lock().unwrap().get(&*question.name) {
            return Err(error.clone());
        }
        if self.nxdomain.lock().unwrap().contains(&*question.name) {
            return Ok(DnsResponse::new(
                0,
                question.clone(),
                ResponseCode::NxDomain,
                vec![],
            ));
        }
        let rdata = match question.record_type {
            RecordType::AAAA => RData::AAAA("2001:db8::1".parse().unwrap()),
            _ => RData::A("192.0.2.1".parse().unwrap()),
        };
        Ok(DnsResponse::new(
            0,
            question.clone(),
            ResponseCode::NoError,
            vec![Answer::new(&question.name, 300, rdata)],
        ))
    }

    fn endpoint(&self) -> &str {
        "mock://upstream"
    }
}

pub struct MockFilter {
    blocked: Mutex<HashSet<(String, String)>>,
    loads: Mutex<Vec<(String, String)>>,
}

impl MockFilter {
    pub fn new() -> Self {
        Self {
            blocked: Mutex::new(HashSet::new()),
            loads: Mutex::new(Vec::new()),
        }
    }

    pub fn block(&self, list: &str, domain: &str) {
        self.blocked
            .lock()
            .unwrap()
            .insert((list.to_string(), domain.to_string()));
    }

    pub fn loads(&self) -> Vec<(String, String)> {
        self.loads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlockFilterEnginePort for MockFilter {
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
        if uri.contains("unreachable") {
            return Err(DomainError::DownloadFailure {
                name: name.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        self.loads
            .lock()
            .unwrap()
            .push((uri.to_string(), name.to_string()));
        Ok(ListDescriptor::new(
            name,
            uri,
            86400,
            PathBuf::from(format!("/tmp/{}.txt", name)),
        ))
    }

    async fn reload(&self) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn check_list(&self, _name: &str) -> Result<Option<ListDescriptor>, DomainError> {
        Ok(None)
    }

    fn default_list(&self) -> ListDescriptor {
        ListDescriptor::new(
            "default",
            "https://lists.test/default.txt",
            86400,
            PathBuf::from("lists/default.txt"),
        )
    }

    fn list_state(&self, _name: &str) -> ListState {
        ListState::Unregistered
    }

    fn known_lists(&self) -> Vec<String> {
        Vec::new()
    }
}

pub struct TestApp {
    pub router: Router,
    pub cache: Arc<MemoryCacheStore>,
    pub upstream: Arc<MockUpstream>,
    pub filter: Arc<MockFilter>,
}

impl TestApp {
    pub fn new() -> Self {
        let cache = Arc::new(MemoryCacheStore::new());
        let upstream = Arc::new(MockUpstream::new());
        let filter = Arc::new(MockFilter::new());

        let resolve = Arc::new(ResolveDnsQueryUseCase::new(
            Arc::new(HickoryCodec::new()),
            cache.clone(),
            upstream.clone(),
            filter.clone(),
        ));
        let state = AppState {
            dns: DnsState {
                resolve,
                query_count: Arc::new(GetQueryCountUseCase::new(cache.clone())),
            },
            filter: FilterState {
                load_list: Arc::new(LoadFilterListUseCase::new(filter.clone())),
                default_list: Arc::new(GetDefaultListUseCase::new(filter.clone())),
                check_domain: Arc::new(CheckDomainUseCase::new(filter.clone())),
            },
        };

        Self {
            router: create_app(state),
            cache,
            upstream,
            filter,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub fn wire_query(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    HickoryCodec::new()
        .encode_query(id, &Question::internet(name, record_type))
        .unwrap()
}

pub fn decode_wire(body: &[u8]) -> DnsResponse {
    HickoryCodec::new().decode_response(body).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header(response: &Response<Body>, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
