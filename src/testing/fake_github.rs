use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::{AppError, Issue, IssueLabel, RepoPath};
use crate::ports::{FileWrite, GitHub, RemoteFile};

/// In-memory repository and issue tracker.
///
/// Files map path -> (sha, bytes). Every call is recorded so tests can assert
/// on the exact sequence of mutations.
#[derive(Default)]
pub struct FakeGitHub {
    pub issues: Mutex<Vec<Issue>>,
    pub files: Mutex<BTreeMap<String, (String, Vec<u8>)>>,
    pub writes: Mutex<Vec<(String, FileWrite)>>,
    pub deletes: Mutex<Vec<(String, String)>>,
    pub comments: Mutex<Vec<(u64, String)>>,
    pub closed: Mutex<Vec<u64>>,
    /// Paths whose lookups fail with a server error.
    pub broken_paths: Mutex<Vec<String>>,
    pub fail_comments: Mutex<bool>,
    next_sha: Mutex<u64>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(self, number: u64, body: &str) -> Self {
        self.issues.lock().unwrap().push(Issue {
            number,
            body: Some(body.to_string()),
            labels: vec![IssueLabel { name: "gpt-command".to_string() }],
            pull_request: None,
        });
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        let sha = self.allocate_sha();
        self.files.lock().unwrap().insert(path.to_string(), (sha, content.as_bytes().to_vec()));
        self
    }

    pub fn file_content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(_, bytes)| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn sha_of(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).map(|(sha, _)| sha.clone())
    }

    pub fn written_paths(&self) -> Vec<String> {
        self.writes.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.writes.lock().unwrap().len() + self.deletes.lock().unwrap().len()
    }

    fn allocate_sha(&self) -> String {
        let mut next = self.next_sha.lock().unwrap();
        *next += 1;
        format!("sha-{}", *next)
    }

    fn server_error(operation: &str) -> AppError {
        AppError::GitHubApi { operation: operation.to_string(), status: 500, body: "boom".into() }
    }
}

impl GitHub for FakeGitHub {
    fn latest_labeled_issue(&self, label: &str) -> Result<Option<Issue>, AppError> {
        let issues = self.issues.lock().unwrap();
        Ok(issues
            .iter()
            .rev()
            .find(|issue| issue.has_label(label) && !issue.is_pull_request())
            .cloned())
    }

    fn get_file(&self, path: &RepoPath) -> Result<Option<RemoteFile>, AppError> {
        if self.broken_paths.lock().unwrap().iter().any(|p| p == path.as_str()) {
            return Err(Self::server_error("get file"));
        }
        Ok(self.files.lock().unwrap().get(path.as_str()).map(|(sha, _)| RemoteFile { sha: sha.clone() }))
    }

    fn put_file(&self, path: &RepoPath, write: &FileWrite) -> Result<(), AppError> {
        let current = self.sha_of(path.as_str());
        if current != write.sha {
            return Err(AppError::GitHubApi {
                operation: "put file".into(),
                status: 409,
                body: format!("{} does not match", path),
            });
        }
        let sha = self.allocate_sha();
        self.files.lock().unwrap().insert(path.to_string(), (sha, write.content.clone()));
        self.writes.lock().unwrap().push((path.to_string(), write.clone()));
        Ok(())
    }

    fn delete_file(&self, path: &RepoPath, message: &str, sha: &str) -> Result<(), AppError> {
        if self.sha_of(path.as_str()).as_deref() != Some(sha) {
            return Err(AppError::GitHubApi {
                operation: "delete file".into(),
                status: 409,
                body: format!("{} does not match", path),
            });
        }
        self.files.lock().unwrap().remove(path.as_str());
        self.deletes.lock().unwrap().push((path.to_string(), message.to_string()));
        Ok(())
    }

    fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<(), AppError> {
        if *self.fail_comments.lock().unwrap() {
            return Err(Self::server_error("create issue comment"));
        }
        self.comments.lock().unwrap().push((issue_number, body.to_string()));
        Ok(())
    }

    fn close_issue(&self, issue_number: u64) -> Result<(), AppError> {
        self.closed.lock().unwrap().push(issue_number);
        Ok(())
    }
}
