//! Command executor: one branch per action.
//!
//! Writes are preceded by placeholder creation for every missing ancestor
//! directory, since the contents API only materializes directories through
//! file paths. The existence check and the write are separate calls, so two
//! concurrent runs may both commit the same placeholder.

use crate::app::AppContext;
use crate::domain::{AppError, Command, CommandOutcome, RepoPath};
use crate::ports::{FileWrite, GitHub};

/// Run a validated command against the repository or tracker.
pub fn execute<G: GitHub>(ctx: &AppContext<G>, command: &Command) -> Result<CommandOutcome, AppError> {
    tracing::info!(action = command.action().as_str(), path = ?command.path().map(RepoPath::as_str), "executing command");

    match command {
        Command::Create { path, content, message } => {
            if ctx.github().get_file(path)?.is_some() {
                return Err(AppError::FileExists(path.to_string()));
            }
            write_file(ctx, path, content, message, None)?;
            Ok(CommandOutcome::Created { path: path.clone() })
        }
        Command::Update { path, content, message } => {
            let sha = ctx.github().get_file(path)?.map(|file| file.sha);
            write_file(ctx, path, content, message, sha)?;
            Ok(CommandOutcome::Updated { path: path.clone() })
        }
        Command::Delete { path, message } => {
            let file = ctx
                .github()
                .get_file(path)?
                .ok_or_else(|| AppError::FileNotFound(path.to_string()))?;
            ctx.github().delete_file(path, message, &file.sha)?;
            tracing::info!(path = path.as_str(), "deleted file");
            Ok(CommandOutcome::Deleted { path: path.clone() })
        }
        Command::Comment { issue_number, content } => {
            ctx.github().create_issue_comment(*issue_number, content)?;
            tracing::info!(issue = issue_number, "posted comment");
            Ok(CommandOutcome::Commented { issue_number: *issue_number })
        }
    }
}

fn write_file<G: GitHub>(
    ctx: &AppContext<G>,
    path: &RepoPath,
    content: &str,
    message: &str,
    sha: Option<String>,
) -> Result<(), AppError> {
    ensure_directories(ctx, path)?;
    let overwrite = sha.is_some();
    let write = FileWrite { message: message.to_string(), content: content.as_bytes().to_vec(), sha };
    ctx.github().put_file(path, &write)?;
    tracing::info!(path = path.as_str(), overwrite, "wrote file");
    Ok(())
}

/// Commit a placeholder into every ancestor directory of `path` that lacks one.
///
/// Returns the markers created, shallowest first.
pub fn ensure_directories<G: GitHub>(
    ctx: &AppContext<G>,
    path: &RepoPath,
) -> Result<Vec<RepoPath>, AppError> {
    let placeholder = ctx.placeholder();
    let mut created = Vec::new();

    for marker in path.placeholder_paths(&placeholder.file_name) {
        // The target itself is written by the caller.
        if marker == *path {
            continue;
        }
        if ctx.github().get_file(&marker)?.is_some() {
            continue;
        }

        println!("📁 Creating missing dir placeholder: {}", marker);
        let write = FileWrite {
            message: format!("chore: create folder placeholder for {}", marker),
            content: placeholder.content.as_bytes().to_vec(),
            sha: None,
        };
        ctx.github().put_file(&marker, &write)?;
        tracing::info!(placeholder = marker.as_str(), "created directory placeholder");
        created.push(marker);
    }

    Ok(created)
}
