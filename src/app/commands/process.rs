//! `process` command: one full Fetching -> Parsing -> Executing -> Responding run.

use crate::app::AppContext;
use crate::app::commands::{execute, fetch, respond};
use crate::domain::outcome::failure_summary;
use crate::domain::{AppError, Command, CommandOutcome, Issue};
use crate::ports::GitHub;

/// Result of one pipeline run.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// No open issue carried the command label.
    NoIssue { label: String },
    /// An issue was handled and closed.
    Handled(IssueReport),
}

/// What happened to the selected issue.
#[derive(Debug)]
pub struct IssueReport {
    pub issue_number: u64,
    /// Command outcome, or the error reported on the issue.
    pub result: Result<CommandOutcome, AppError>,
    /// Comment body posted on the issue.
    pub comment: String,
}

impl IssueReport {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run the pipeline once.
///
/// Parse and execution failures are reported on the issue and do not fail the
/// run. Errors from fetching or responding are returned.
pub fn execute<G: GitHub>(ctx: &AppContext<G>) -> Result<ProcessOutcome, AppError> {
    let Some(issue) = fetch::latest_command_issue(ctx)? else {
        return Ok(ProcessOutcome::NoIssue { label: ctx.label().to_string() });
    };

    let result = run_command(ctx, &issue);
    let comment = match &result {
        Ok(outcome) => outcome.summary(),
        Err(err) => {
            tracing::warn!(
                issue = issue.number,
                category = err.category().as_str(),
                error = %err,
                "command failed"
            );
            failure_summary(err)
        }
    };

    respond::respond(ctx, issue.number, &comment)?;

    Ok(ProcessOutcome::Handled(IssueReport { issue_number: issue.number, result, comment }))
}

fn run_command<G: GitHub>(ctx: &AppContext<G>, issue: &Issue) -> Result<CommandOutcome, AppError> {
    let body = issue
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or(AppError::EmptyIssueBody(issue.number))?;
    println!("📥 Issue #{} body:\n{}", issue.number, body);

    let command = Command::parse(body)?;
    tracing::debug!(issue = issue.number, ?command, "parsed command");
    if matches!(&command, Command::Comment { issue_number, .. } if *issue_number == issue.number) {
        return Err(AppError::CommentTargetsTriggeringIssue(issue.number));
    }
    execute::execute(ctx, &command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlaceholderConfig;
    use crate::testing::FakeGitHub;

    fn run(gh: FakeGitHub) -> (AppContext<FakeGitHub>, ProcessOutcome) {
        let ctx = AppContext::new(gh, "gpt-command", PlaceholderConfig::default());
        let outcome = execute(&ctx).unwrap();
        (ctx, outcome)
    }

    fn report(outcome: ProcessOutcome) -> IssueReport {
        match outcome {
            ProcessOutcome::Handled(report) => report,
            other => panic!("expected a handled issue, got {:?}", other),
        }
    }

    #[test]
    fn no_issue_is_not_an_error() {
        let (ctx, outcome) = run(FakeGitHub::new());
        assert!(matches!(outcome, ProcessOutcome::NoIssue { ref label } if label == "gpt-command"));
        assert!(ctx.github().comments.lock().unwrap().is_empty());
        assert!(ctx.github().closed.lock().unwrap().is_empty());
    }

    #[test]
    fn create_scenario_reports_success_and_closes() {
        let gh = FakeGitHub::new()
            .with_issue(10, r#"{"action":"create","path":"notes/a.txt","content":"hi"}"#);
        let (ctx, outcome) = run(gh);
        let report = report(outcome);

        assert!(report.succeeded());
        assert_eq!(ctx.github().file_content("notes/a.txt").as_deref(), Some("hi"));
        assert!(ctx.github().file_content("notes/.keep").is_some());
        let comments = ctx.github().comments.lock().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].0, 10);
        assert!(comments[0].1.contains("notes/a.txt"));
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![10]);
    }

    #[test]
    fn delete_missing_reports_error_and_closes() {
        let gh = FakeGitHub::new().with_issue(11, r#"{"action":"delete","path":"missing.txt"}"#);
        let (ctx, outcome) = run(gh);
        let report = report(outcome);

        assert!(!report.succeeded());
        assert_eq!(report.comment, "❌ Command failed: File not found: missing.txt");
        assert_eq!(ctx.github().mutation_count(), 0);
        assert_eq!(*ctx.github().comments.lock().unwrap(), vec![(11, report.comment.clone())]);
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![11]);
    }

    #[test]
    fn malformed_body_reports_error_and_closes() {
        let gh = FakeGitHub::new().with_issue(12, "please make me a file");
        let (ctx, outcome) = run(gh);
        let report = report(outcome);

        assert!(matches!(report.result, Err(AppError::ParseError { .. })));
        assert!(report.comment.starts_with("❌ Command failed: Failed to parse command body"));
        assert_eq!(ctx.github().mutation_count(), 0);
        assert_eq!(ctx.github().comments.lock().unwrap().len(), 1);
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![12]);
    }

    #[test]
    fn unsupported_action_is_reported() {
        let gh = FakeGitHub::new().with_issue(13, r#"{"action":"move","path":"a.txt"}"#);
        let (_, outcome) = run(gh);

        assert_eq!(report(outcome).comment, "❌ Command failed: Unsupported action: move");
    }

    #[test]
    fn empty_body_is_reported() {
        let gh = FakeGitHub::new().with_issue(14, "   ");
        let (ctx, outcome) = run(gh);

        assert!(matches!(report(outcome).result, Err(AppError::EmptyIssueBody(14))));
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![14]);
    }

    #[test]
    fn comment_action_reports_on_triggering_issue() {
        let gh = FakeGitHub::new()
            .with_issue(15, r#"{"action":"comment","issue_number":3,"content":"status: green"}"#);
        let (ctx, outcome) = run(gh);

        assert!(report(outcome).succeeded());
        assert_eq!(
            *ctx.github().comments.lock().unwrap(),
            vec![
                (3, "status: green".to_string()),
                (15, "💬 Comment posted to issue #3.".to_string())
            ]
        );
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![15]);
    }

    #[test]
    fn comment_on_triggering_issue_is_rejected_with_one_report() {
        let gh = FakeGitHub::new()
            .with_issue(15, r#"{"action":"comment","issue_number":15,"content":"status: green"}"#);
        let (ctx, outcome) = run(gh);
        let report = report(outcome);

        assert!(matches!(report.result, Err(AppError::CommentTargetsTriggeringIssue(15))));
        assert_eq!(
            *ctx.github().comments.lock().unwrap(),
            vec![(
                15,
                "❌ Command failed: Comment target #15 is the issue that triggered this command"
                    .to_string()
            )]
        );
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![15]);
    }

    #[test]
    fn responder_failure_fails_the_run() {
        let gh = FakeGitHub::new().with_issue(16, r#"{"action":"update","path":"a.txt","content":"x"}"#);
        *gh.fail_comments.lock().unwrap() = true;
        let ctx = AppContext::new(gh, "gpt-command", PlaceholderConfig::default());

        assert!(execute(&ctx).is_err());
        assert_eq!(*ctx.github().closed.lock().unwrap(), vec![16]);
    }
}
