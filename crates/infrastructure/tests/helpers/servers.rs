use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ndns_application::ports::DnsCodec;
use ndns_domain::{Answer, RData, Response, ResponseCode};
use ndns_infrastructure::dns::HickoryCodec;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Binds an ephemeral local port and serves `router` on it.
pub async fn spawn_http(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[derive(Clone, Default)]
pub struct UpstreamState {
    pub hits: Arc<AtomicUsize>,
}

impl UpstreamState {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Minimal DoH upstream: `example.com` resolves, everything else is NXDOMAIN.
pub fn doh_upstream(state: UpstreamState) -> Router {
    Router::new()
        .route("/dns-query", get(answer_doh_get))
        .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/garbage",
            get(|| async { ([(header::CONTENT_TYPE, "application/dns-message")], vec![1u8, 2, 3]) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                StatusCode::OK
            }),
        )
        .with_state(state)
}

async fn answer_doh_get(
    State(state): State<UpstreamState>,
    Query(params): Query<HashMap<String, String>>,
) -> HttpResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let codec = HickoryCodec::new();

    let Some(wire) = params.get("dns").and_then(|d| URL_SAFE_NO_PAD.decode(d).ok()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let Ok(query) = codec.decode_query(&wire) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let response = if &*query.question.name == "example.com" {
        Response::new(
            query.id,
            query.question.clone(),
            ResponseCode::NoError,
            vec![Answer::new(
                "example.com",
                300,
                RData::A("93.184.216.34".parse().unwrap()),
            )],
        )
    } else {
        Response::new(query.id, query.question.clone(), ResponseCode::NxDomain, vec![])
    };

    (
        [(header::CONTENT_TYPE, "application/dns-message")],
        codec.encode_response(&response).unwrap(),
    )
        .into_response()
}

/// Serves filter list bodies by name; `/slow.txt` never finishes in time.
pub fn list_server(lists: HashMap<&'static str, &'static str>) -> Router {
    let lists = Arc::new(lists);
    Router::new()
        .route(
            "/lists/{file}",
            get(
                move |axum::extract::Path(file): axum::extract::Path<String>| {
                    let lists = Arc::clone(&lists);
                    async move {
                        match lists.get(file.as_str()) {
                            Some(body) => (StatusCode::OK, body.to_string()).into_response(),
                            None => StatusCode::NOT_FOUND.into_response(),
                        }
                    }
                },
            ),
        )
        .route(
            "/slow.txt",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late.test\n"
            }),
        )
}
