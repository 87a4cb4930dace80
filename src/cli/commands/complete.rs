//! complete command - Print completions for a partial line

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Print the completions for `line`, one per line.
///
/// Messages a failure handler sends while completing are discarded.
pub fn complete(ctx: &Context, line: &str) -> Result<ExitCode> {
    let mut registry = ctx.registry()?;
    let sender = ctx.buffered_sender();
    let suggestions = registry.suggest_line(line, &sender)?;
    tracing::debug!(count = suggestions.len(), line, "completed");

    if ctx.json {
        output::json(&suggestions)?;
    } else {
        // Quiet mode still prints completions.
        for suggestion in &suggestions {
            println!("{}", suggestion);
        }
    }

    registry.teardown();
    Ok(ExitCode::SUCCESS)
}
