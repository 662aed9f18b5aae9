//! Commands carried in issue bodies.
//!
//! Wire format (JSON object):
//! `{"action": "create"|"update"|"delete"|"comment", "path": "...",
//!   "content": "...", "message": "...", "issue_number": 12}`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, RepoPath};

/// Action names accepted in the `action` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Create,
    Update,
    Delete,
    Comment,
}

impl CommandAction {
    pub const ALL: [CommandAction; 4] =
        [CommandAction::Create, CommandAction::Update, CommandAction::Delete, CommandAction::Comment];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandAction::Create => "create",
            CommandAction::Update => "update",
            CommandAction::Delete => "delete",
            CommandAction::Comment => "comment",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::UnsupportedAction(value.to_string()))
    }
}

impl fmt::Display for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body as deserialized, before per-action validation.
#[derive(Debug, Default, Deserialize)]
struct RawCommand {
    action: Option<String>,
    path: Option<String>,
    content: Option<String>,
    message: Option<String>,
    issue_number: Option<u64>,
}

/// A validated command, ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { path: RepoPath, content: String, message: String },
    Update { path: RepoPath, content: String, message: String },
    Delete { path: RepoPath, message: String },
    Comment { issue_number: u64, content: String },
}

impl Command {
    /// Parse and validate an issue body.
    pub fn parse(body: &str) -> Result<Self, AppError> {
        let raw: RawCommand = serde_json::from_str(body)
            .map_err(|e| AppError::ParseError { what: "command body".into(), details: e.to_string() })?;

        let action_name = raw.action.as_deref().map(str::trim).unwrap_or_default();
        if action_name.is_empty() {
            return Err(AppError::MissingAction);
        }
        let action = CommandAction::parse(action_name)?;

        match action {
            CommandAction::Create | CommandAction::Update => {
                let path = required_path(action, raw.path.as_deref())?;
                let content = raw.content.ok_or_else(|| AppError::missing_field(action.as_str(), "content"))?;
                let message = commit_message(action, &path, raw.message);
                if action == CommandAction::Create {
                    Ok(Command::Create { path, content, message })
                } else {
                    Ok(Command::Update { path, content, message })
                }
            }
            CommandAction::Delete => {
                let path = required_path(action, raw.path.as_deref())?;
                let message = commit_message(action, &path, raw.message);
                Ok(Command::Delete { path, message })
            }
            CommandAction::Comment => {
                let issue_number = match raw.issue_number {
                    Some(0) | None => return Err(AppError::missing_field("comment", "issue_number")),
                    Some(number) => number,
                };
                let content = raw.content.ok_or_else(|| AppError::missing_field("comment", "content"))?;
                if content.trim().is_empty() {
                    return Err(AppError::missing_field("comment", "content"));
                }
                Ok(Command::Comment { issue_number, content })
            }
        }
    }

    pub fn action(&self) -> CommandAction {
        match self {
            Command::Create { .. } => CommandAction::Create,
            Command::Update { .. } => CommandAction::Update,
            Command::Delete { .. } => CommandAction::Delete,
            Command::Comment { .. } => CommandAction::Comment,
        }
    }

    /// Target file, if the command mutates one.
    pub fn path(&self) -> Option<&RepoPath> {
        match self {
            Command::Create { path, .. } | Command::Update { path, .. } | Command::Delete { path, .. } => {
                Some(path)
            }
            Command::Comment { .. } => None,
        }
    }

    /// Normalized JSON view, used by `check`.
    pub fn to_summary(&self) -> CommandSummary {
        let (content_bytes, message, issue_number) = match self {
            Command::Create { content, message, .. } | Command::Update { content, message, .. } => {
                (Some(content.len()), Some(message.clone()), None)
            }
            Command::Delete { message, .. } => (None, Some(message.clone()), None),
            Command::Comment { issue_number, content } => (Some(content.len()), None, Some(*issue_number)),
        };
        CommandSummary {
            action: self.action().as_str().to_string(),
            path: self.path().map(|p| p.to_string()),
            content_bytes,
            message,
            issue_number,
        }
    }
}

/// Serializable description of a parsed command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSummary {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
}

fn required_path(action: CommandAction, raw: Option<&str>) -> Result<RepoPath, AppError> {
    let raw = raw.ok_or_else(|| AppError::missing_field(action.as_str(), "path"))?;
    RepoPath::parse(raw)
}

fn commit_message(action: CommandAction, path: &RepoPath, given: Option<String>) -> String {
    given
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("{}: {}", action.as_str(), path))
}
