use crate::config::ArchiveConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::size_in_mb;
use futures::StreamExt;
use std::path::Path;
use tokio::fs;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

/// Streams one file from the data endpoint to `destination`.
///
/// The parent directory of `destination` is created (with intermediates) if it
/// does not exist. The body is written incrementally through a `chunk_size` byte
/// buffer; empty keep-alive chunks are skipped. Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if the request fails, the archive answers with an error
/// status, or the file cannot be created or written. A failure mid-stream leaves
/// the partially written file in place.
pub async fn download_file(
    client: &reqwest::Client,
    config: &ArchiveConfig,
    file_id: &str,
    destination: &Path,
) -> AppResult<u64> {
    let url = config.data_url(file_id)?;
    debug!(url = %url, destination = %destination.display(), "Starting download");

    let response = client.get(url.as_str()).send().await.map_err(|e| {
        AppError::NetworkError(format!("Failed to download {file_id}: {e}"))
    })?;

    let status = response.status();
    let response = response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::NetworkError(format!(
            "HTTP {status_code}: Failed to download {file_id}: {e}"
        ))
    })?;

    // create_dir_all succeeds when the directory already exists
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(destination).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to create file {}: {}",
            destination.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::with_capacity(config.chunk_size, file);

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if chunk.is_empty() {
            continue;
        }
        writer.write_all(&chunk).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to write to {}: {}",
                destination.display(),
                e
            ))
        })?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    // Close the response stream before reporting completion
    drop(stream);

    debug!(
        file_id,
        size_mb = size_in_mb(written),
        "Download finished"
    );
    Ok(written)
}
