//! check command - Validate the command file and list usage paths

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Context;
use crate::engine::Command;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct CommandSummary {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    nodes: usize,
    usage: Vec<String>,
}

impl From<&Command> for CommandSummary {
    fn from(command: &Command) -> Self {
        Self {
            name: command.name().to_string(),
            aliases: command.aliases().iter().map(ToString::to_string).collect(),
            description: command.description().map(str::to_string),
            nodes: command.root().node_count(),
            usage: command.usage(),
        }
    }
}

/// Build every command in the file and print its executable paths.
///
/// A file that fails to load or build is an error (exit 2).
pub fn check(ctx: &Context) -> Result<ExitCode> {
    let mut registry = ctx.registry()?;
    let summaries: Vec<CommandSummary> = registry.list().map(CommandSummary::from).collect();

    if ctx.json {
        output::json(&summaries)?;
    } else {
        for summary in &summaries {
            let mut heading = summary.name.clone();
            if !summary.aliases.is_empty() {
                heading.push_str(&format!(" (aliases: {})", summary.aliases.join(", ")));
            }
            if let Some(description) = &summary.description {
                heading.push_str(&format!(" - {}", description));
            }
            output::print(heading, ctx.verbosity);
            if !summary.usage.is_empty() {
                output::print(output::format_list(&summary.usage, "  "), ctx.verbosity);
            }
        }
        output::print(
            format!("{} command(s) OK", summaries.len()),
            ctx.verbosity,
        );
    }

    registry.teardown();
    Ok(ExitCode::SUCCESS)
}
