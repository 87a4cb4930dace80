//! run command - Dispatch one command line

use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use crate::cli::{Context, EXIT_COMMAND_FAILED};
use crate::engine::{Outcome, RegistryError};
use crate::ui::output;

#[derive(Debug, Serialize)]
struct RunReport {
    line: String,
    success: bool,
    failure: Option<FailureReport>,
    messages: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FailureReport {
    kind: &'static str,
    message: Option<String>,
}

/// Dispatch `tokens` as one command line.
///
/// Tokens are re-joined and tokenized by the engine so quoting behaves the
/// same as in `repl`.
pub fn run(ctx: &Context, tokens: &[String]) -> Result<ExitCode> {
    let mut registry = ctx.registry()?;
    let line = tokens.join(" ");

    let code = if ctx.json {
        let sender = ctx.buffered_sender();
        let outcome = registry.dispatch_line(&line, &sender);
        let messages = sender.take_messages();
        let (success, failure) = match outcome {
            Ok(outcome) => (
                outcome.is_success(),
                outcome.failure().map(|failure| FailureReport {
                    kind: failure.kind().as_str(),
                    message: failure.message(),
                }),
            ),
            Err(err @ RegistryError::UnknownCommand { .. }) => (
                false,
                Some(FailureReport {
                    kind: "unknown_command",
                    message: Some(err.to_string()),
                }),
            ),
            Err(err) => return Err(err.into()),
        };
        output::json(&RunReport {
            line,
            success,
            failure,
            messages,
        })?;
        exit_code(success)
    } else {
        let sender = ctx.console_sender();
        match registry.dispatch_line(&line, &sender) {
            Ok(outcome) => exit_code(succeeded(&outcome)),
            Err(err @ RegistryError::UnknownCommand { .. }) => {
                output::error(err);
                exit_code(false)
            }
            Err(err) => return Err(err.into()),
        }
    };

    registry.teardown();
    Ok(code)
}

fn succeeded(outcome: &Outcome) -> bool {
    if let Some(failure) = outcome.failure() {
        tracing::debug!(kind = failure.kind().as_str(), "command failed");
    }
    outcome.is_success()
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_COMMAND_FAILED)
    }
}
