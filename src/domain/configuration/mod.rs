pub mod loader;
pub mod relay_config;

pub use loader::{ConfigOverrides, load_config, parse_config_content, resolve_config};
pub use relay_config::{
    ConfigFile, DEFAULT_COMMAND_LABEL, GitHubApiConfig, PlaceholderConfig, RelayConfig, RepoSlug,
};
