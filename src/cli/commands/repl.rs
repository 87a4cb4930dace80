//! repl command - Dispatch lines read from stdin

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::engine::{CommandRegistry, RegistryError, Sender};
use crate::ui::output;

const PROMPT: &str = "> ";

/// Suffix that asks for completions instead of running the line.
const SUGGEST_MARKER: char = '?';

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Request<'a> {
    Skip,
    Dispatch(&'a str),
    Suggest(&'a str),
}

fn classify(line: &str) -> Request<'_> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Request::Skip;
    }
    match line.trim_end().strip_suffix(SUGGEST_MARKER) {
        Some(partial) => Request::Suggest(partial),
        None => Request::Dispatch(line.trim_end()),
    }
}

/// Read lines from stdin until end of input.
pub fn repl(ctx: &Context) -> Result<ExitCode> {
    let mut registry = ctx.registry()?;
    let sender = ctx.console_sender();
    let interactive = io::stdin().is_terminal() && ctx.verbosity != output::Verbosity::Quiet;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        handle_line(&registry, &sender, ctx, &line)?;
    }

    registry.teardown();
    Ok(ExitCode::SUCCESS)
}

fn handle_line(
    registry: &CommandRegistry,
    sender: &dyn Sender,
    ctx: &Context,
    line: &str,
) -> Result<()> {
    match classify(line) {
        Request::Skip => Ok(()),
        Request::Suggest(partial) => {
            let suggestions = registry.suggest_line(partial, sender)?;
            if ctx.json {
                output::json(&suggestions)?;
            } else {
                println!("{}", suggestions.join("  "));
            }
            Ok(())
        }
        Request::Dispatch(line) => match registry.dispatch_line(line, sender) {
            Ok(outcome) => {
                tracing::debug!(success = outcome.is_success(), line, "dispatched");
                Ok(())
            }
            Err(err @ RegistryError::UnknownCommand { .. }) => {
                output::error(err);
                Ok(())
            }
            Err(err) => Err(err.into()),
        },
    }
}
