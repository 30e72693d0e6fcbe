use super::read_hits;
use crate::config::ArchiveConfig;
use crate::errors::AppResult;
use crate::models::ProjectHit;
use tracing::{debug, info, warn};

/// Lists the archive's project identifiers that start with the configured prefix.
///
/// Sends a single form-encoded POST to the project endpoint requesting up to
/// `project_page_size` identifiers. The result keeps the server's order.
///
/// # Errors
///
/// Returns an error if the request fails, the archive answers with an error
/// status, or the body does not contain `data.hits[].project_id`.
pub async fn list_projects(
    client: &reqwest::Client,
    config: &ArchiveConfig,
) -> AppResult<Vec<String>> {
    let endpoint = config.projects_endpoint.as_str();
    let size = config.project_page_size.to_string();
    debug!(endpoint, size = %size, "Requesting project list");

    let response = client
        .post(endpoint)
        .form(&[("size", size.as_str()), ("fields", "project_id")])
        .send()
        .await?;
    let hits: Vec<ProjectHit> = read_hits(response, endpoint).await?;
    let total = hits.len();

    let project_ids = filter_by_prefix(
        hits.into_iter().map(|hit| hit.project_id),
        &config.project_prefix,
    );

    if project_ids.is_empty() {
        warn!(
            prefix = %config.project_prefix,
            projects_listed = total,
            "No project matches the prefix"
        );
    } else {
        info!(
            prefix = %config.project_prefix,
            projects_listed = total,
            projects_matched = project_ids.len(),
            "Project list fetched"
        );
    }

    Ok(project_ids)
}

/// Keeps the identifiers that start with `prefix` (exact, case-sensitive), in input order.
pub fn filter_by_prefix<I>(project_ids: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    project_ids
        .into_iter()
        .filter(|id| id.starts_with(prefix))
        .collect()
}
