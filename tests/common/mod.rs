//! Common test utilities for integration tests
//!
//! Provides canned Gitee payloads and config builders shared by the
//! integration test files.

#![allow(dead_code)]

use serde_json::{json, Value};
use sigstats::domain::models::{Config, RemoteConfig};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Remote config pointing at a mock server.
pub fn remote_for(base_url: &str) -> RemoteConfig {
    RemoteConfig {
        base_url: base_url.to_string(),
        token: Some("test-token".to_string()),
        ..Default::default()
    }
}

/// Full config: mock remote, in-memory SQLite store, reports in `output_dir`.
pub fn config_for(base_url: &str, output_dir: &std::path::Path) -> Config {
    let mut config = Config {
        remote: remote_for(base_url),
        ..Default::default()
    };
    config.database.url = Some("sqlite::memory:".to_string());
    config.report.output_dir = output_dir.display().to_string();
    config
}

/// Tree listing of the community repository.
pub fn tree_body() -> String {
    json!({
        "sha": "abc",
        "truncated": false,
        "tree": [
            { "path": "sig", "type": "tree" },
            { "path": "sig/Kernel/openeuler/k/kernel.yaml", "type": "blob" },
            { "path": "sig/Compiler/src-openeuler/g/gcc.yaml", "type": "blob" },
            { "path": "sig/Kernel/OWNERS", "type": "blob" },
        ]
    })
    .to_string()
}

pub fn pull_json(url: &str, labels: &[&str], draft: bool, mergeable: Option<bool>) -> Value {
    json!({
        "html_url": url,
        "title": "Fix build",
        "user": { "login": "bob" },
        "number": 7,
        "draft": draft,
        "mergeable": mergeable,
        "created_at": "2024-03-08T10:00:00+08:00",
        "labels": labels.iter().map(|l| json!({ "name": l })).collect::<Vec<_>>(),
    })
}

pub fn issue_json(url: &str, repo: Option<&str>) -> Value {
    json!({
        "html_url": url,
        "title": "Crash on boot",
        "repository": repo.map(|r| json!({ "full_name": r })),
        "user": { "login": "alice" },
        "number": "I4ABCD",
        "issue_type": "缺陷",
        "issue_state_detail": { "title": "待办的" },
        "created_at": "2024-03-01T00:00:00+08:00",
        "labels": [{ "name": "sig/Kernel" }],
    })
}

pub fn page(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}
