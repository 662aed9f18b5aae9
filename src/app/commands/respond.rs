//! Responder: reports the outcome on the triggering issue and closes it.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::GitHub;

/// Post `comment` on the issue, then close it.
///
/// Both calls are always attempted; the first failure is returned.
pub fn respond<G: GitHub>(ctx: &AppContext<G>, issue_number: u64, comment: &str) -> Result<(), AppError> {
    let commented = ctx.github().create_issue_comment(issue_number, comment);
    if let Err(err) = &commented {
        tracing::error!(issue = issue_number, error = %err, "failed to post result comment");
    }

    let closed = ctx.github().close_issue(issue_number);
    match &closed {
        Ok(()) => tracing::info!(issue = issue_number, "closed issue"),
        Err(err) => tracing::error!(issue = issue_number, error = %err, "failed to close issue"),
    }

    commented.and(closed)
}
