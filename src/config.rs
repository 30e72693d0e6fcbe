use crate::constants::*;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Endpoints, filter literals and output settings shared read-only across a run.
///
/// Built once at startup (from [`Default`] or a TOML file) and passed by reference
/// to every function that builds a request or a destination path. All fields have
/// concrete values, so callers never unwrap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Project search endpoint (form-encoded POST)
    pub projects_endpoint: String,
    /// File search endpoint (JSON POST)
    pub files_endpoint: String,
    /// Data retrieval base URL; the file identifier is appended to it
    pub data_endpoint: String,

    // Filters
    /// Projects whose identifier does not start with this prefix are skipped (case-sensitive)
    pub project_prefix: String,
    pub data_format: String,
    pub access: String,

    // Result caps
    pub project_page_size: u32,
    pub file_page_size: u32,
    /// Fields requested for every file hit; must include every [`FileRecord`] field
    ///
    /// [`FileRecord`]: crate::models::FileRecord
    pub file_fields: Vec<String>,

    // Downloads
    /// Root directory for downloads; files land in `<output_root>/<project_id>/`
    pub output_root: PathBuf,
    /// Write buffer size in bytes used while streaming a file to disk
    pub chunk_size: usize,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            projects_endpoint: PROJECTS_ENDPOINT.to_string(),
            files_endpoint: FILES_ENDPOINT.to_string(),
            data_endpoint: DATA_ENDPOINT.to_string(),
            project_prefix: PROJECT_PREFIX.to_string(),
            data_format: DATA_FORMAT.to_string(),
            access: OPEN_ACCESS.to_string(),
            project_page_size: PROJECT_PAGE_SIZE,
            file_page_size: FILE_PAGE_SIZE,
            file_fields: FILE_FIELDS.iter().map(|f| f.to_string()).collect(),
            output_root: PathBuf::from(OUTPUT_ROOT),
            chunk_size: DOWNLOAD_CHUNK_SIZE,
        }
    }
}

impl ArchiveConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Missing keys fall back to the built-in defaults; unknown keys are rejected
    /// so typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, and `InvalidInput` if the TOML
    /// is malformed or any value fails [`ArchiveConfig::validate`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ArchiveConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> AppResult<()> {
        for (name, endpoint) in [
            ("projects_endpoint", &self.projects_endpoint),
            ("files_endpoint", &self.files_endpoint),
            ("data_endpoint", &self.data_endpoint),
        ] {
            Url::parse(endpoint)
                .map_err(|e| AppError::UrlError(format!("{name} '{endpoint}': {e}")))?;
        }

        if self.project_prefix.is_empty() {
            return Err(AppError::InvalidInput(
                "Project prefix must not be empty".into(),
            ));
        }
        if self.data_format.is_empty() || self.access.is_empty() {
            return Err(AppError::InvalidInput(
                "Data format and access level must not be empty".into(),
            ));
        }
        if self.project_page_size == 0 || self.file_page_size == 0 {
            return Err(AppError::InvalidInput(
                "Page sizes must be greater than 0".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(AppError::InvalidInput(
                "Chunk size must be greater than 0".into(),
            ));
        }
        for required in ["file_id", "file_name", "file_size", "md5sum"] {
            if !self.file_fields.iter().any(|f| f == required) {
                return Err(AppError::InvalidInput(format!(
                    "file_fields must include '{required}'"
                )));
            }
        }

        Ok(())
    }

    /// Full data URL for a file identifier.
    ///
    /// The identifier is appended to the data endpoint as one path segment, whether
    /// or not the configured endpoint ends with a slash.
    pub fn data_url(&self, file_id: &str) -> AppResult<Url> {
        let mut base = Url::parse(&self.data_endpoint)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(file_id)?)
    }
}
