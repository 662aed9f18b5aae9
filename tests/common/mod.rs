//! Shared testing utilities for issue-relay CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RELAY_ENV: [&str; 4] = ["GITHUB_REPOSITORY", "GH_TOKEN", "GITHUB_TOKEN", "GITHUB_API_URL"];

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    server: mockito::ServerGuard,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with a mock GitHub API.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root, server: mockito::Server::new() }
    }

    pub fn server(&mut self) -> &mut mockito::ServerGuard {
        &mut self.server
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command with no relay configuration inherited from the host.
    pub fn bare_cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("issue-relay").expect("Failed to locate issue-relay binary");
        cmd.current_dir(self.work_dir());
        for key in RELAY_ENV {
            cmd.env_remove(key);
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Build a command configured against the mock server for `octo/repo`.
    pub fn cli(&self) -> Command {
        let mut cmd = self.bare_cli();
        cmd.env("GITHUB_REPOSITORY", "octo/repo")
            .env("GH_TOKEN", "test-token")
            .env("GITHUB_API_URL", self.server.url());
        cmd
    }

    /// Write a file under the work directory and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Mock the issue listing to return one issue with `body`.
    pub fn mock_issue(&mut self, number: u64, body: &str) -> mockito::Mock {
        let listing = serde_json::json!([
            {"number": number, "title": "command", "body": body, "labels": [{"name": "gpt-command"}]}
        ]);
        self.server
            .mock("GET", "/repos/octo/repo/issues")
            .match_query(mockito::Matcher::UrlEncoded("labels".into(), "gpt-command".into()))
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing.to_string())
            .create()
    }

    /// Mock the result comment and close calls for an issue.
    pub fn mock_response(&mut self, number: u64, comment: &str) -> (mockito::Mock, mockito::Mock) {
        let comment_mock = self
            .server
            .mock("POST", format!("/repos/octo/repo/issues/{}/comments", number).as_str())
            .match_body(mockito::Matcher::Json(serde_json::json!({"body": comment})))
            .with_status(201)
            .with_body("{}")
            .expect(1)
            .create();
        let close_mock = self
            .server
            .mock("PATCH", format!("/repos/octo/repo/issues/{}", number).as_str())
            .match_body(mockito::Matcher::Json(serde_json::json!({"state": "closed"})))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create();
        (comment_mock, close_mock)
    }

    /// Mock a contents lookup that finds nothing.
    pub fn mock_missing(&mut self, path: &str) -> mockito::Mock {
        self.server
            .mock("GET", format!("/repos/octo/repo/contents/{}", path).as_str())
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create()
    }

    /// Mock a contents lookup that finds a file with `sha`.
    pub fn mock_existing(&mut self, path: &str, sha: &str) -> mockito::Mock {
        let body = serde_json::json!({"type": "file", "path": path, "sha": sha, "encoding": "base64", "content": ""});
        self.server
            .mock("GET", format!("/repos/octo/repo/contents/{}", path).as_str())
            .with_status(200)
            .with_body(body.to_string())
            .create()
    }
}
