//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads what it needs from the [`Context`] (registry, config)
//! 2. Hands lines to the engine
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Errors bubble up as
//! `anyhow::Error` and are reported by `main`.

mod check;
mod complete;
mod completion;
mod config_cmd;
mod repl;
mod run;

pub use check::check;
pub use complete::complete;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, path as config_path};
pub use repl::repl;
pub use run::run;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    match command {
        Command::Run { tokens } => run::run(ctx, &tokens),
        Command::Complete { line } => complete::complete(ctx, &line),
        Command::Check => check::check(ctx),
        Command::Repl => repl::repl(ctx),
        Command::Config { action } => match action.unwrap_or(ConfigAction::List) {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
