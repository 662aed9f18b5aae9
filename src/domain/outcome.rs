//! Results of executed commands and the comments that report them.

use crate::domain::{AppError, RepoPath};

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created { path: RepoPath },
    Updated { path: RepoPath },
    Deleted { path: RepoPath },
    Commented { issue_number: u64 },
}

impl CommandOutcome {
    /// Comment body posted on the triggering issue.
    pub fn summary(&self) -> String {
        match self {
            CommandOutcome::Created { path } => format!("✅ File `{}` created.", path),
            CommandOutcome::Updated { path } => format!("✅ File `{}` updated.", path),
            CommandOutcome::Deleted { path } => format!("🗑️ File `{}` deleted.", path),
            CommandOutcome::Commented { issue_number } => {
                format!("💬 Comment posted to issue #{}.", issue_number)
            }
        }
    }
}

/// Comment body for a failed command.
pub fn failure_summary(error: &AppError) -> String {
    format!("❌ Command failed: {}", error)
}
