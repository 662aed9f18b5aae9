//! issue-relay: execute repository file commands filed as labeled GitHub issues.
//!
//! One invocation selects the newest open issue carrying the command label,
//! parses its JSON body, performs the requested create, update, delete or
//! comment through the REST API, then comments the result and closes the issue.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod logging;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::HttpGitHubClient;
use app::{
    AppContext,
    commands::{check, process},
};

pub use app::commands::process::{IssueReport, ProcessOutcome};
pub use domain::{AppError, CommandSummary, ConfigOverrides, RelayConfig};

/// Resolve configuration and process the newest command issue.
pub fn process(overrides: &ConfigOverrides) -> Result<ProcessOutcome, AppError> {
    let config = domain::configuration::load_config(overrides)?;
    process_with_config(&config)
}

/// Process the newest command issue with an already resolved configuration.
pub fn process_with_config(config: &RelayConfig) -> Result<ProcessOutcome, AppError> {
    tracing::debug!(?config, "resolved configuration");
    let github = HttpGitHubClient::from_config(config)?;
    let ctx = AppContext::from_config(github, config);

    let outcome = process::execute(&ctx)?;
    match &outcome {
        ProcessOutcome::NoIssue { label } => {
            println!("ℹ️ No open `{}` issues found.", label);
        }
        ProcessOutcome::Handled(report) if report.succeeded() => {
            println!("Issue #{} closed: {}", report.issue_number, report.comment);
        }
        ProcessOutcome::Handled(report) => {
            println!("{}", report.comment);
            println!("Issue #{} closed with failure report.", report.issue_number);
        }
    }
    Ok(outcome)
}

/// Validate a command body without contacting GitHub.
pub fn check(body: &str) -> Result<CommandSummary, AppError> {
    check::execute(body)
}
