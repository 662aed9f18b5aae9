//! Offline validation of a command body.

use crate::domain::{AppError, Command, CommandSummary};

/// Parse `body` exactly as the pipeline would, without touching the network.
pub fn execute(body: &str) -> Result<CommandSummary, AppError> {
    let command = Command::parse(body)?;
    Ok(command.to_summary())
}
