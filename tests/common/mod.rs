//! Common test utilities for integration tests: a mock GDC Legacy Archive and a config pointing at it.

use gdc_mafs::config::ArchiveConfig;
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const PROJECTS_PATH: &str = "/legacy/projects/";
#[allow(dead_code)]
pub const FILES_PATH: &str = "/legacy/files/";

/// Config whose endpoints point at `server` and whose downloads land under `output_root`.
#[allow(dead_code)]
pub fn config_for(server: &MockServer, output_root: &Path) -> ArchiveConfig {
    ArchiveConfig {
        projects_endpoint: format!("{}{PROJECTS_PATH}", server.uri()),
        files_endpoint: format!("{}{FILES_PATH}", server.uri()),
        data_endpoint: format!("{}/legacy/data/", server.uri()),
        output_root: output_root.to_path_buf(),
        ..ArchiveConfig::default()
    }
}

/// Search envelope around `hits`.
#[allow(dead_code)]
pub fn envelope(hits: Value) -> Value {
    json!({ "data": { "hits": hits, "pagination": {} }, "warnings": {} })
}

/// One file hit as the archive returns it.
#[allow(dead_code)]
pub fn file_hit(file_id: &str, file_name: &str, file_size: u64) -> Value {
    json!({
        "file_id": file_id,
        "file_name": file_name,
        "file_size": file_size,
        "md5sum": "d41d8cd98f00b204e9800998ecf8427e"
    })
}

/// Mounts the project search answering with `project_ids`.
#[allow(dead_code)]
pub async fn mount_projects(server: &MockServer, project_ids: &[&str]) {
    let hits: Vec<Value> = project_ids
        .iter()
        .map(|id| json!({ "project_id": id }))
        .collect();

    Mock::given(method("POST"))
        .and(path(PROJECTS_PATH))
        .and(body_string_contains("fields=project_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Array(hits))))
        .mount(server)
        .await;
}

/// Mounts the file search for one project answering with `hits`.
#[allow(dead_code)]
pub async fn mount_files(server: &MockServer, project_id: &str, hits: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path(FILES_PATH))
        .and(body_string_contains(format!("\"value\":\"{project_id}\"")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(Value::Array(hits))))
        .mount(server)
        .await;
}

/// Mounts the data endpoint for one file.
#[allow(dead_code)]
pub async fn mount_data(server: &MockServer, file_id: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/legacy/data/{file_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// JSON bodies of every file search the server received, in arrival order.
#[allow(dead_code)]
pub async fn file_queries(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == FILES_PATH)
        .map(|request| serde_json::from_slice(&request.body).unwrap())
        .collect()
}

/// Number of requests the server received on the data endpoint.
#[allow(dead_code)]
pub async fn data_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().starts_with("/legacy/data/"))
        .count()
}
