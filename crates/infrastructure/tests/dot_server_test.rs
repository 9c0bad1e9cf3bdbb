mod helpers;

use helpers::{PassAllFilter, StubUpstream};
use ndns_application::ports::{CacheStore, DnsCodec};
use ndns_application::use_cases::ResolveDnsQueryUseCase;
use ndns_domain::cache_key::QUERY_COUNT_KEY;
use ndns_domain::{CacheValue, Question, RecordType, ResponseCode};
use ndns_infrastructure::dns::codec::{read_frame, write_frame};
use ndns_infrastructure::dns::{DotConnectionHandler, HickoryCodec, MemoryCacheStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, DuplexStream};

struct DotHarness {
    cache: Arc<MemoryCacheStore>,
    upstream: Arc<StubUpstream>,
    client: DuplexStream,
}

fn start(upstream: StubUpstream) -> DotHarness {
    let cache = Arc::new(MemoryCacheStore::new());
    let upstream = Arc::new(upstream);
    let use_case = Arc::new(ResolveDnsQueryUseCase::new(
        Arc::new(HickoryCodec::new()),
        cache.clone(),
        upstream.clone(),
        Arc::new(PassAllFilter),
    ));
    let handler = DotConnectionHandler::new(use_case);

    let (client, server) = tokio::io::duplex(16 * 1024);
    tokio::spawn(async move {
        handler.serve(server, "test-peer").await;
    });

    DotHarness {
        cache,
        upstream,
        client,
    }
}

fn query(id: u16, name: &str) -> Vec<u8> {
    HickoryCodec::new()
        .encode_query(id, &Question::internet(name, RecordType::A))
        .unwrap()
}

async fn next_reply(client: &mut DuplexStream) -> ndns_domain::Response {
    let frame = tokio::time::timeout(Duration::from_secs(5), read_frame(client))
        .await
        .expect("reply in time")
        .unwrap()
        .expect("open stream");
    HickoryCodec::new().decode_response(&frame).unwrap()
}

#[tokio::test]
async fn test_two_frames_on_one_connection_count_twice_with_one_upstream_call() {
    let mut harness = start(StubUpstream::new());

    write_frame(&mut harness.client, &query(0x1111, "example.com"))
        .await
        .unwrap();
    let first = next_reply(&mut harness.client).await;

    write_frame(&mut harness.client, &query(0x2222, "example.com"))
        .await
        .unwrap();
    let second = next_reply(&mut harness.client).await;

    assert_eq!(first.id, 0x1111);
    assert_eq!(second.id, 0x2222);
    assert_eq!(first.answers, second.answers);
    assert_eq!(first.answers.len(), 1);
    assert_eq!(harness.upstream.calls(), 1);
    assert_eq!(
        harness.cache.get(QUERY_COUNT_KEY).await.unwrap(),
        Some(CacheValue::Counter(2))
    );
}

#[tokio::test]
async fn test_pipelined_frames_all_get_replies() {
    let mut harness = start(StubUpstream::new());

    for (id, name) in [(1u16, "a.test"), (2, "b.test"), (3, "c.test")] {
        write_frame(&mut harness.client, &query(id, name)).await.unwrap();
    }

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(next_reply(&mut harness.client).await.id);
    }
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_upstream_failure_answers_servfail_with_query_id() {
    let mut harness = start(StubUpstream::failing());

    write_frame(&mut harness.client, &query(0xbeef, "example.com"))
        .await
        .unwrap();
    let reply = next_reply(&mut harness.client).await;

    assert_eq!(reply.id, 0xbeef);
    assert_eq!(reply.rcode, ResponseCode::ServFail);
    assert_eq!(
        reply.question().map(|q| q.name.to_string()),
        Some("example.com".to_string())
    );
    assert!(harness.cache.get(QUERY_COUNT_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_frame_with_header_gets_formerr() {
    let mut harness = start(StubUpstream::new());
    let mut header_only = vec![0u8; 12];
    header_only[0] = 0x0a;
    header_only[1] = 0x0b;

    write_frame(&mut harness.client, &header_only).await.unwrap();
    let reply = next_reply(&mut harness.client).await;

    assert_eq!(reply.id, 0x0a0b);
    assert_eq!(reply.rcode, ResponseCode::FormErr);
    assert_eq!(harness.upstream.calls(), 0);
}

#[tokio::test]
async fn test_unreadable_frame_is_dropped_and_connection_stays_open() {
    let mut harness = start(StubUpstream::new());

    write_frame(&mut harness.client, &[0xff, 0xff, 0xff]).await.unwrap();
    write_frame(&mut harness.client, &query(7, "example.com"))
        .await
        .unwrap();

    let reply = next_reply(&mut harness.client).await;
    assert_eq!(reply.id, 7);
    assert_eq!(reply.rcode, ResponseCode::NoError);
}

#[tokio::test]
async fn test_client_close_ends_connection() {
    let mut harness = start(StubUpstream::new());

    write_frame(&mut harness.client, &query(1, "example.com"))
        .await
        .unwrap();
    let _ = next_reply(&mut harness.client).await;
    harness.client.shutdown().await.unwrap();

    let after = tokio::time::timeout(Duration::from_secs(5), read_frame(&mut harness.client))
        .await
        .expect("server closes its side");
    assert_eq!(after.unwrap(), None);
}
