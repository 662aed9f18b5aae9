//! Issue fetcher: selects the command issue for this run.

use crate::app::AppContext;
use crate::domain::{AppError, Issue};
use crate::ports::GitHub;

/// Most recently created open issue carrying the command label.
pub fn latest_command_issue<G: GitHub>(ctx: &AppContext<G>) -> Result<Option<Issue>, AppError> {
    let issue = ctx.github().latest_labeled_issue(ctx.label())?;
    match &issue {
        Some(found) => tracing::info!(issue = found.number, label = ctx.label(), "selected command issue"),
        None => tracing::info!(label = ctx.label(), "no open command issue"),
    }
    Ok(issue)
}
