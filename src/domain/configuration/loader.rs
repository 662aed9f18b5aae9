//! Configuration loading from file, environment and CLI overrides.

use std::fs;
use std::path::PathBuf;

use url::Url;

use crate::domain::configuration::{ConfigFile, RelayConfig, RepoSlug};
use crate::domain::AppError;

pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_TOKEN: &str = "GH_TOKEN";
pub const ENV_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Values supplied on the command line; each wins over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub repository: Option<String>,
    pub label: Option<String>,
    pub api_url: Option<String>,
}

/// Parse the settings file content.
pub fn parse_config_content(content: &str) -> Result<ConfigFile, AppError> {
    let config: ConfigFile = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from the process environment.
pub fn load_config(overrides: &ConfigOverrides) -> Result<RelayConfig, AppError> {
    resolve_config(overrides, |key| std::env::var(key).ok())
}

/// Resolve configuration with an explicit environment lookup.
pub fn resolve_config<F>(overrides: &ConfigOverrides, env: F) -> Result<RelayConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    let mut file = match &overrides.config_path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::config_error(format!("Failed to read config {}: {}", path.display(), e))
            })?;
            parse_config_content(&content)?
        }
        None => ConfigFile::default(),
    };

    if let Some(api_url) = overrides.api_url.clone().or_else(|| lookup(ENV_API_URL)) {
        file.github.api_url = Url::parse(api_url.trim())
            .map_err(|e| AppError::config_error(format!("Invalid API URL '{}': {}", api_url, e)))?;
    }
    if let Some(label) = &overrides.label {
        file.github.label = label.clone();
    }
    file.validate()?;

    let repository = overrides.repository.clone().or_else(|| lookup(ENV_REPOSITORY)).ok_or_else(|| {
        AppError::config_error(format!("{} environment variable not set", ENV_REPOSITORY))
    })?;
    let repository = RepoSlug::parse(&repository)?;

    let token = lookup(ENV_TOKEN).or_else(|| lookup(ENV_TOKEN_FALLBACK)).ok_or_else(|| {
        AppError::config_error(format!(
            "{} environment variable not set (or {})",
            ENV_TOKEN, ENV_TOKEN_FALLBACK
        ))
    })?;

    Ok(RelayConfig {
        repository,
        token: token.trim().to_string(),
        github: file.github,
        placeholder: file.placeholder,
    })
}
