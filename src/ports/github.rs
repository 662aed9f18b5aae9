//! GitHub REST port: the issue and contents calls the relay pipeline makes.

use crate::domain::{AppError, Issue, RepoPath};

/// An existing file as reported by the contents API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    /// Revision token required to overwrite or delete the file.
    pub sha: String,
}

/// Body of a create-or-overwrite call.
#[derive(Debug, Clone)]
pub struct FileWrite {
    pub message: String,
    /// Raw bytes; the adapter handles transport encoding.
    pub content: Vec<u8>,
    /// Current revision token, required when the file already exists.
    pub sha: Option<String>,
}

pub trait GitHub {
    /// Most recently created open issue carrying `label`, skipping pull requests.
    fn latest_labeled_issue(&self, label: &str) -> Result<Option<Issue>, AppError>;

    /// Look up a file's revision token, `None` when the path does not exist.
    fn get_file(&self, path: &RepoPath) -> Result<Option<RemoteFile>, AppError>;

    fn put_file(&self, path: &RepoPath, write: &FileWrite) -> Result<(), AppError>;

    fn delete_file(&self, path: &RepoPath, message: &str, sha: &str) -> Result<(), AppError>;

    fn create_issue_comment(&self, issue_number: u64, body: &str) -> Result<(), AppError>;

    fn close_issue(&self, issue_number: u64) -> Result<(), AppError>;
}
