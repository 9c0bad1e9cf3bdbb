//! Length-prefixed framing for DNS over TCP/TLS (RFC 1035 §4.2.2, RFC 7858).
//!
//! Every message travels behind a 2-byte big-endian length.

use ndns_domain::DomainError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const MAX_FRAME_SIZE: usize = 65535;

/// Prefixes `message` with its 2-byte length.
pub fn stream_encode(message: &[u8]) -> Result<Vec<u8>, DomainError> {
    if message.len() > MAX_FRAME_SIZE {
        return Err(DomainError::EncodingError(format!(
            "Message too large for stream framing: {} bytes (max {})",
            message.len(),
            MAX_FRAME_SIZE
        )));
    }
    let mut framed = Vec::with_capacity(message.len() + 2);
    framed.extend_from_slice(&(message.len() as u16).to_be_bytes());
    framed.extend_from_slice(message);
    Ok(framed)
}

/// Strips the length prefix of one complete frame.
pub fn stream_decode(framed: &[u8]) -> Result<&[u8], DomainError> {
    if framed.len() < 2 {
        return Err(DomainError::MalformedPacket(
            "Frame shorter than its length prefix".to_string(),
        ));
    }
    let declared = u16::from_be_bytes([framed[0], framed[1]]) as usize;
    let body = &framed[2..];
    if body.len() != declared {
        return Err(DomainError::MalformedPacket(format!(
            "Frame declares {} bytes but carries {}",
            declared,
            body.len()
        )));
    }
    Ok(body)
}

pub async fn write_frame<S>(stream: &mut S, message: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let framed = stream_encode(message)?;

    stream
        .write_all(&framed)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS frame: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

/// Reads the next frame. `Ok(None)` means the peer closed the stream
/// cleanly between frames.
pub async fn read_frame<S>(stream: &mut S) -> Result<Option<Vec<u8>>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => {
            return Err(DomainError::IoError(format!(
                "Failed to read frame length: {}",
                e
            )))
        }
    }

    let frame_len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; frame_len];
    stream
        .read_exact(&mut message)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read frame body: {}", e)))?;

    Ok(Some(message))
}
