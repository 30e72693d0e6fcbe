use crate::config::ArchiveConfig;
use crate::constants::{ACCESS_FIELD, DATA_FORMAT_FIELD, PROJECT_ID_FIELD};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Envelope shared by the archive's search endpoints: `{"data": {"hits": [...]}}`.
///
/// Anything else in the response (pagination, warnings) is ignored.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub data: SearchData<T>,
}

#[derive(Debug, Deserialize)]
pub struct SearchData<T> {
    pub hits: Vec<T>,
}

impl<T> SearchResponse<T> {
    pub fn into_hits(self) -> Vec<T> {
        self.data.hits
    }
}

/// One hit of the project search; only the identifier is requested.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectHit {
    pub project_id: String,
}

/// Metadata of one downloadable file as returned by the file search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    pub file_id: String,
    pub file_name: String,
    pub file_size: u64,
    pub md5sum: String,
}

impl FileRecord {
    /// Tab-delimited listing line: project identifier, file identifier, file name.
    pub fn listing_line(&self, project_id: &str) -> String {
        [project_id, self.file_id.as_str(), self.file_name.as_str()].join("\t")
    }

    /// Local path the file is downloaded to: `<output_root>/<project_id>/<file_name>`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the project identifier or the file name is not a
    /// single plain path component (absolute, empty, `.`/`..`, or containing a
    /// separator), since the result would leave the project directory.
    pub fn destination(&self, config: &ArchiveConfig, project_id: &str) -> AppResult<PathBuf> {
        let project_dir = single_component(project_id, "project identifier")?;
        let leaf = single_component(&self.file_name, "file name")?;
        Ok(config.output_root.join(project_dir).join(leaf))
    }
}

fn single_component<'a>(name: &'a str, what: &str) -> AppResult<&'a str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(name),
        _ => Err(AppError::InvalidInput(format!(
            "Refusing {what} '{name}': not a plain path component"
        ))),
    }
}

/// Filter expression in the archive's query language.
///
/// Serializes as `{"op": "and", "content": [...]}` or
/// `{"op": "=", "content": {"field": ..., "value": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "content")]
pub enum Filter {
    #[serde(rename = "and")]
    And(Vec<Filter>),
    #[serde(rename = "=")]
    Equals(FieldValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValue {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn equals(field: &str, value: &str) -> Self {
        Self::Equals(FieldValue {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// JSON body of a file search request.
#[derive(Debug, Clone, Serialize)]
pub struct FileSearchRequest {
    pub filters: Filter,
    pub format: &'static str,
    pub fields: String,
    pub size: String,
}

impl FileSearchRequest {
    /// Query for the open access files of the configured data format in one project.
    ///
    /// The filter is always the conjunction of exactly three equality clauses:
    /// project identifier, data format and access level.
    pub fn for_project(project_id: &str, config: &ArchiveConfig) -> Self {
        Self {
            filters: Filter::And(vec![
                Filter::equals(PROJECT_ID_FIELD, project_id),
                Filter::equals(DATA_FORMAT_FIELD, &config.data_format),
                Filter::equals(ACCESS_FIELD, &config.access),
            ]),
            format: "json",
            fields: config.file_fields.join(","),
            size: config.file_page_size.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> FileRecord {
        FileRecord {
            file_id: "9b3c-44".to_string(),
            file_name: "x.maf".to_string(),
            file_size: 2048,
            md5sum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }
    }

    #[test]
    fn test_listing_line_is_tab_delimited() {
        let line = sample_record().listing_line("TCGA-ABC");
        assert_eq!(line, "TCGA-ABC\t9b3c-44\tx.maf");
        assert_eq!(line.split('\t').count(), 3);
    }

    #[test]
    fn test_destination_uses_project_subdirectory() {
        let config = ArchiveConfig::default();
        let path = sample_record().destination(&config, "TCGA-ABC").unwrap();
        assert_eq!(path, PathBuf::from("mafs/TCGA-ABC/x.maf"));
    }

    #[test]
    fn test_destination_rejects_absolute_file_name() {
        let record = FileRecord {
            file_name: "/tmp/evil.maf".to_string(),
            ..sample_record()
        };
        let err = record
            .destination(&ArchiveConfig::default(), "TCGA-ABC")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("/tmp/evil.maf")));
    }

    #[test]
    fn test_destination_rejects_parent_traversal() {
        let config = ArchiveConfig::default();
        for name in ["../../outside.maf", "..", "sub/x.maf", "./x.maf", ""] {
            let record = FileRecord {
                file_name: name.to_string(),
                ..sample_record()
            };
            assert!(
                record.destination(&config, "TCGA-ABC").is_err(),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_destination_rejects_unsafe_project_identifier() {
        let config = ArchiveConfig::default();
        for project in ["../TCGA-ABC", "/TCGA-ABC", "TCGA-ABC/..", "."] {
            assert!(sample_record().destination(&config, project).is_err());
        }
    }

    #[test]
    fn test_file_search_request_payload_shape() {
        let config = ArchiveConfig::default();
        let request = FileSearchRequest::for_project("TCGA-BRCA", &config);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "filters": {
                    "op": "and",
                    "content": [
                        {"op": "=", "content": {"field": "cases.project.project_id", "value": "TCGA-BRCA"}},
                        {"op": "=", "content": {"field": "files.data_format", "value": "MAF"}},
                        {"op": "=", "content": {"field": "access", "value": "open"}}
                    ]
                },
                "format": "json",
                "fields": "file_id,file_name,file_size,md5sum",
                "size": "1000"
            })
        );
    }

    #[test]
    fn test_file_search_request_is_built_fresh_per_project() {
        let config = ArchiveConfig::default();
        let first = FileSearchRequest::for_project("TCGA-ABC", &config);
        let second = FileSearchRequest::for_project("TCGA-DEF", &config);

        for (request, project) in [(first, "TCGA-ABC"), (second, "TCGA-DEF")] {
            match request.filters {
                Filter::And(clauses) => {
                    assert_eq!(clauses.len(), 3);
                    assert_eq!(clauses[0], Filter::equals(PROJECT_ID_FIELD, project));
                }
                other => panic!("expected conjunction, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_search_response_parses_file_hits() {
        let body = r#"{
            "data": {
                "hits": [
                    {"file_id": "a1", "file_name": "a.maf", "file_size": 10, "md5sum": "aa"},
                    {"file_id": "b2", "file_name": "b.maf", "file_size": 20, "md5sum": "bb"}
                ],
                "pagination": {"count": 2, "total": 2}
            },
            "warnings": {}
        }"#;

        let hits = serde_json::from_str::<SearchResponse<FileRecord>>(body)
            .unwrap()
            .into_hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].file_id, "a1");
        assert_eq!(hits[1].file_size, 20);
    }

    #[test]
    fn test_search_response_missing_field_fails() {
        let body = r#"{"data": {"hits": [{"file_id": "a1", "file_size": 10, "md5sum": "aa"}]}}"#;

        let err = serde_json::from_str::<SearchResponse<FileRecord>>(body).unwrap_err();
        assert!(err.to_string().contains("file_name"));
    }

    #[test]
    fn test_search_response_missing_hits_fails() {
        let body = r#"{"data": {}}"#;
        assert!(serde_json::from_str::<SearchResponse<ProjectHit>>(body).is_err());
    }
}
