use std::io;

use thiserror::Error;

/// Library-wide error type for issue-relay operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Repository identity is not in `owner/name` form.
    #[error("Invalid repository '{0}': expected 'owner/name'")]
    InvalidRepository(String),

    /// Request never produced a response.
    #[error("HTTP request failed during {operation}: {details}")]
    Http { operation: String, details: String },

    /// GitHub answered with a non-success status.
    #[error("GitHub API error during {operation} ({status}): {body}")]
    GitHubApi { operation: String, status: u16, body: String },

    /// GitHub answered successfully but with a payload we cannot use.
    #[error("Unexpected GitHub response during {operation}: {details}")]
    UnexpectedResponse { operation: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// The triggering issue has no body to parse.
    #[error("Issue #{0} has an empty body")]
    EmptyIssueBody(u64),

    /// The command object has no `action`.
    #[error("Missing required field 'action'")]
    MissingAction,

    /// A field required by the chosen action is absent.
    #[error("Missing required field '{field}' for action '{action}'")]
    MissingField { action: String, field: String },

    /// The `action` value is not one we dispatch on.
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Repository-relative path failed validation.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// `create` against a path that already holds a file.
    #[error("File already exists: {0} (use action: update)")]
    FileExists(String),

    /// `delete` against a path with no file.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// `comment` aimed at the issue that carries the command; that issue
    /// already receives the outcome report.
    #[error("Comment target #{0} is the issue that triggered this command")]
    CommentTargetsTriggeringIssue(u64),

    /// Path resolves to a directory listing rather than a file.
    #[error("Path is a directory, not a file: {0}")]
    NotAFile(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Coarse classification used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Validation,
    Precondition,
    Configuration,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Precondition => "precondition",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn missing_field(action: &str, field: &str) -> Self {
        AppError::MissingField { action: action.to_string(), field: field.to_string() }
    }

    pub fn invalid_path(path: &str, reason: &str) -> Self {
        AppError::InvalidPath { path: path.to_string(), reason: reason.to_string() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Http { .. }
            | AppError::GitHubApi { .. }
            | AppError::UnexpectedResponse { .. } => ErrorCategory::Transport,
            AppError::ParseError { .. }
            | AppError::EmptyIssueBody(_)
            | AppError::MissingAction
            | AppError::MissingField { .. }
            | AppError::UnsupportedAction(_)
            | AppError::InvalidPath { .. } => ErrorCategory::Validation,
            AppError::FileExists(_)
            | AppError::FileNotFound(_)
            | AppError::NotAFile(_)
            | AppError::CommentTargetsTriggeringIssue(_) => ErrorCategory::Precondition,
            AppError::Io(_)
            | AppError::Configuration(_)
            | AppError::InvalidRepository(_)
            | AppError::TomlParseError(_) => ErrorCategory::Configuration,
        }
    }
}
