//! Relay configuration domain models.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Default label that marks an issue as a command.
pub const DEFAULT_COMMAND_LABEL: &str = "gpt-command";

/// Fully resolved configuration for one pipeline run.
#[derive(Clone)]
pub struct RelayConfig {
    /// Repository the commands act on, and whose issues are polled.
    pub repository: RepoSlug,
    /// Bearer token for every API call.
    pub token: String,
    pub github: GitHubApiConfig,
    pub placeholder: PlaceholderConfig,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("repository", &self.repository)
            .field("token", &"[REDACTED]")
            .field("github", &self.github)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

/// Optional settings file (`--config`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub github: GitHubApiConfig,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

impl ConfigFile {
    pub fn validate(&self) -> Result<(), AppError> {
        self.github.validate()?;
        self.placeholder.validate()?;
        Ok(())
    }
}

/// GitHub REST API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubApiConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Label that selects command issues.
    #[serde(default = "default_label")]
    pub label: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// `User-Agent` header; GitHub rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            label: default_label(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl GitHubApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.label.trim().is_empty() {
            return Err(AppError::config_error("label must not be empty"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::config_error("user_agent must not be empty"));
        }
        if self.api_url.cannot_be_a_base() || !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(AppError::config_error(format!(
                "api_url must be an absolute http(s) URL: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com").expect("Default API URL must be valid")
}

fn default_label() -> String {
    DEFAULT_COMMAND_LABEL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("issue-relay/{}", env!("CARGO_PKG_VERSION"))
}

/// Directory placeholder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// Marker file name committed into each missing directory.
    #[serde(default = "default_placeholder_name")]
    pub file_name: String,
    /// Filler content of the marker.
    #[serde(default = "default_placeholder_content")]
    pub content: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { file_name: default_placeholder_name(), content: default_placeholder_content() }
    }
}

impl PlaceholderConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.file_name.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(AppError::config_error(format!(
                "placeholder file_name must be a single path segment, got '{}'",
                name
            )));
        }
        Ok(())
    }
}

fn default_placeholder_name() -> String {
    ".keep".to_string()
}

fn default_placeholder_content() -> String {
    "placeholder".to_string()
}

/// Repository identity in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self { owner: owner.to_string(), name: name.to_string() })
            }
            _ => Err(AppError::InvalidRepository(value.to_string())),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
