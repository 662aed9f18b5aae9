pub mod command;
pub mod configuration;
pub mod content;
pub mod error;
pub mod issue;
pub mod outcome;
pub mod repo_path;

pub use command::{Command, CommandAction, CommandSummary};
pub use configuration::{
    ConfigOverrides, GitHubApiConfig, PlaceholderConfig, RelayConfig, RepoSlug,
};
pub use content::{decode_content, encode_content};
pub use error::{AppError, ErrorCategory};
pub use issue::{Issue, IssueLabel};
pub use outcome::CommandOutcome;
pub use repo_path::RepoPath;
