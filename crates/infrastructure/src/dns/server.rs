//! DNS-over-TLS connection handling (RFC 7858).
//!
//! Each inbound frame is resolved on its own task and the replies are
//! funnelled back through a single writer task, so a slow upstream answer
//! never holds up later frames on the same connection. Replies may
//! therefore leave in a different order than the queries arrived; clients
//! match them by id.

use crate::dns::codec::{read_frame, write_frame, HickoryCodec};
use ndns_application::ports::DnsCodec;
use ndns_application::use_cases::ResolveDnsQueryUseCase;
use ndns_domain::{DomainError, Response, ResponseCode};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const REPLY_QUEUE_DEPTH: usize = 64;

pub struct DotConnectionHandler {
    use_case: Arc<ResolveDnsQueryUseCase>,
}

impl DotConnectionHandler {
    pub fn new(use_case: Arc<ResolveDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Serves one established connection until the peer closes it.
    pub async fn serve<S>(&self, stream: S, peer: &str)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (mut reader, mut writer) = tokio::io::split(stream);
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(REPLY_QUEUE_DEPTH);

        let writer_peer = peer.to_string();
        let writer_task = tokio::spawn(async move {
            while let Some(reply) = rx.recv().await {
                if let Err(e) = write_frame(&mut writer, &reply).await {
                    debug!(peer = %writer_peer, error = %e, "Dropping replies for closed connection");
                    break;
                }
            }
        });

        let mut frames = 0u64;
        loop {
            match read_frame(&mut reader).await {
                Ok(Some(frame)) => {
                    frames += 1;
                    let use_case = Arc::clone(&self.use_case);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Some(reply) = answer_frame(&use_case, &frame).await {
                            let _ = tx.send(reply).await;
                        }
                    });
                }
                Ok(None) => break,
                Err(e) => {
                    debug!(peer = %peer, error = %e, "DoT stream ended mid-frame");
                    break;
                }
            }
        }

        drop(tx);
        let _ = writer_task.await;
        debug!(peer = %peer, frames, "DoT connection closed");
    }
}

/// Resolves one frame body. `None` means the frame is dropped without a reply.
pub async fn answer_frame(use_case: &ResolveDnsQueryUseCase, frame: &[u8]) -> Option<Vec<u8>> {
    let error = match use_case.execute(frame, None).await {
        Ok(resolution) => match use_case.encode(&resolution) {
            Ok(reply) => return Some(reply),
            Err(e) => e,
        },
        Err(e) => e,
    };

    let codec = HickoryCodec::new();
    let reply = match &error {
        DomainError::MalformedPacket(_) => {
            let id = HickoryCodec::header_id(frame)?;
            debug!(id, error = %error, "Answering malformed DoT frame with FORMERR");
            Response::error(id, None, ResponseCode::FormErr)
        }
        _ => {
            let query = codec.decode_query(frame).ok()?;
            warn!(question = %query.question, error = %error, "Answering DoT query with SERVFAIL");
            let mut reply = Response::error(query.id, Some(query.question), ResponseCode::ServFail)
                .with_question_name(&query.wire_name);
            reply.recursion_desired = query.recursion_desired;
            reply
        }
    };

    codec.encode_response(&reply).ok()
}
