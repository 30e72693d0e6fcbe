use super::read_hits;
use crate::config::ArchiveConfig;
use crate::errors::AppResult;
use crate::models::{FileRecord, FileSearchRequest};
use tracing::debug;

/// Builds the file search payload for one project.
pub fn build_file_query(project_id: &str, config: &ArchiveConfig) -> FileSearchRequest {
    FileSearchRequest::for_project(project_id, config)
}

/// Lists the files of one project that match the configured data format and access level.
///
/// Sends the payload from [`build_file_query`] as a JSON POST to the file endpoint.
/// Records come back in server order; at most `file_page_size` of them.
///
/// # Errors
///
/// Returns an error if the request fails, the archive answers with an error
/// status, or any hit lacks one of the [`FileRecord`] fields.
pub async fn list_project_files(
    client: &reqwest::Client,
    config: &ArchiveConfig,
    project_id: &str,
) -> AppResult<Vec<FileRecord>> {
    let endpoint = config.files_endpoint.as_str();
    let payload = build_file_query(project_id, config);
    debug!(endpoint, project_id, "Requesting file list");

    let response = client.post(endpoint).json(&payload).send().await?;
    let records: Vec<FileRecord> = read_hits(response, endpoint).await?;

    debug!(project_id, files = records.len(), "File list fetched");
    Ok(records)
}
