//! Requests against the GDC Legacy Archive.
//!
//! The three submodules map one-to-one onto the archive endpoints used by a run:
//! [`list_projects`] (project search), [`list_project_files`] (file search) and
//! [`download_file`] (data retrieval).

mod data;
mod files;
mod projects;

// Re-export public API
pub use data::download_file;
pub use files::{build_file_query, list_project_files};
pub use projects::{filter_by_prefix, list_projects};

use crate::errors::{AppError, AppResult};
use crate::models::SearchResponse;
use serde::de::DeserializeOwned;

/// Checks the status of a search response and parses its hits.
///
/// The body is read as text first so a malformed payload is reported together
/// with the endpoint that produced it.
async fn read_hits<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> AppResult<Vec<T>> {
    let status = response.status();
    let response = response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::NetworkError(format!("HTTP {status_code}: {endpoint}: {e}"))
    })?;

    let body = response.text().await?;
    let parsed: SearchResponse<T> = serde_json::from_str(&body).map_err(|e| {
        AppError::ParseError(format!("Unexpected response from {endpoint}: {e}"))
    })?;

    Ok(parsed.into_hits())
}
