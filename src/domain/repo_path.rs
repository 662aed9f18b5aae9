//! Repository-relative file paths.

use std::fmt;

use crate::domain::AppError;

/// A validated, `/`-separated path inside the repository.
///
/// Leading slashes are stripped. Empty segments, `.` and `..` are rejected so the
/// path always names a file below the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath(String);

impl RepoPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::invalid_path(raw, "path is empty"));
        }
        if trimmed.ends_with('/') {
            return Err(AppError::invalid_path(raw, "path must name a file, not a directory"));
        }
        for segment in trimmed.split('/') {
            match segment {
                "" => return Err(AppError::invalid_path(raw, "path contains an empty segment")),
                "." | ".." => {
                    return Err(AppError::invalid_path(raw, "relative segments are not allowed"));
                }
                _ => {}
            }
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Every ancestor directory, shallowest first (`a/b/c.txt` -> `a`, `a/b`).
    pub fn parent_prefixes(&self) -> Vec<String> {
        let segments: Vec<&str> = self.segments().collect();
        (1..segments.len()).map(|depth| segments[..depth].join("/")).collect()
    }

    /// Placeholder marker paths for every ancestor directory.
    pub fn placeholder_paths(&self, file_name: &str) -> Vec<RepoPath> {
        self.parent_prefixes()
            .into_iter()
            .map(|prefix| RepoPath(format!("{}/{}", prefix, file_name)))
            .collect()
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
