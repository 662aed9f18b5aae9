use crate::domain::{PlaceholderConfig, RelayConfig};
use crate::ports::GitHub;

/// Application context holding dependencies for one pipeline run.
pub struct AppContext<G: GitHub> {
    github: G,
    label: String,
    placeholder: PlaceholderConfig,
}

impl<G: GitHub> AppContext<G> {
    /// Create a new application context.
    pub fn new(github: G, label: impl Into<String>, placeholder: PlaceholderConfig) -> Self {
        Self { github, label: label.into(), placeholder }
    }

    /// Build a context from resolved configuration.
    pub fn from_config(github: G, config: &RelayConfig) -> Self {
        Self::new(github, config.github.label.clone(), config.placeholder.clone())
    }

    /// Get a reference to the GitHub port.
    pub fn github(&self) -> &G {
        &self.github
    }

    /// Label that marks command issues.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Directory placeholder settings.
    pub fn placeholder(&self) -> &PlaceholderConfig {
        &self.placeholder
    }
}
