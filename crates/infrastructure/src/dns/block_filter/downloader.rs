use futures::StreamExt;
use ndns_domain::DomainError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Streams `uri` into `destination` without holding the body in memory.
///
/// The body is written to a sibling `.part` file and renamed into place once
/// complete, so a failed or timed-out download never leaves a truncated list
/// behind and never clobbers the previous copy.
pub async fn download_to_file(
    client: &reqwest::Client,
    name: &str,
    uri: &str,
    destination: &Path,
    timeout: Duration,
) -> Result<u64, DomainError> {
    let partial = partial_path(destination);

    let result = tokio::time::timeout(timeout, stream_body(client, uri, &partial)).await;

    let outcome = match result {
        Ok(Ok(bytes)) => tokio::fs::rename(&partial, destination)
            .await
            .map(|_| bytes)
            .map_err(|e| format!("failed to move list into place: {}", e)),
        Ok(Err(reason)) => Err(reason),
        Err(_) => Err(format!("timed out after {}s", timeout.as_secs_f32())),
    };

    match outcome {
        Ok(bytes) => {
            debug!(list = %name, uri = %uri, bytes, "List downloaded");
            Ok(bytes)
        }
        Err(reason) => {
            let _ = tokio::fs::remove_file(&partial).await;
            Err(DomainError::DownloadFailure {
                name: name.to_string(),
                reason,
            })
        }
    }
}

async fn stream_body(client: &reqwest::Client, uri: &str, partial: &Path) -> Result<u64, String> {
    let response = client
        .get(uri)
        .send()
        .await
        .map_err(|e| format!("fetch error for {}: {}", uri, e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {} for {}", response.status().as_u16(), uri));
    }

    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| format!("cannot create {}: {}", partial.display(), e))?;

    let mut written = 0u64;
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| format!("read error for {}: {}", uri, e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| format!("write error for {}: {}", partial.display(), e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| format!("flush error for {}: {}", partial.display(), e))?;

    Ok(written)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}
