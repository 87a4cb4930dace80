//! cli
//!
//! Command-line interface layer for cmdtree.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and the command file
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds a registry
//! from the command file, and hands lines to the [`crate::engine`]. Output
//! goes through [`crate::ui`]; diagnostics go through `tracing` on stderr.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::config::{CommandFile, Config};
use crate::engine::declarative::register_file;
use crate::engine::{BufferedSender, BuildLimits, CommandRegistry, PermissionSet};
use crate::ui::console::ConsoleSender;
use crate::ui::output::{self, Verbosity};

/// Exit status of a dispatched command that failed.
pub const EXIT_COMMAND_FAILED: u8 = 1;

/// Settings shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output verbosity
    pub verbosity: Verbosity,
    /// Machine-readable output
    pub json: bool,
    /// Effective configuration
    pub config: Config,
    /// Command file from `--commands`
    pub commands: Option<PathBuf>,
    /// Sender name (flag overrides config)
    pub sender_name: String,
    /// Sender permissions (config plus flags)
    pub permissions: PermissionSet,
}

impl Context {
    /// Combine parsed flags with loaded configuration.
    pub fn new(cli: &Cli, config: Config) -> Self {
        let sender_name = cli
            .sender
            .clone()
            .unwrap_or_else(|| config.console_name().to_string());

        let mut permissions = PermissionSet::new(config.console_permissions().iter().cloned());
        for permission in &cli.permissions {
            permissions.grant(permission.clone());
        }

        Self {
            verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
            json: cli.json,
            commands: cli.commands.clone(),
            sender_name,
            permissions,
            config,
        }
    }

    /// Limits commands are built against.
    pub fn build_limits(&self) -> BuildLimits {
        self.config
            .suggestion_limit()
            .map_or_else(BuildLimits::default, |max_suggestions| BuildLimits {
                max_suggestions,
            })
    }

    /// The command file to load: `--commands`, then the configured one.
    pub fn commands_path(&self) -> Option<PathBuf> {
        self.commands.clone().or_else(|| self.config.commands_file())
    }

    /// A sender that prints to the terminal.
    pub fn console_sender(&self) -> ConsoleSender {
        ConsoleSender::new(&self.sender_name, self.permissions.clone(), self.verbosity)
    }

    /// A sender with the same identity that collects messages instead.
    pub fn buffered_sender(&self) -> BufferedSender {
        BufferedSender::new(&self.sender_name).with_permissions(self.permissions.iter())
    }

    /// Load the command file and register every command in it.
    pub fn registry(&self) -> Result<CommandRegistry> {
        let path = self.commands_path().ok_or_else(|| {
            anyhow!("no command file; pass --commands or set console.commands_file in the config")
        })?;

        let file = CommandFile::load(&path)
            .with_context(|| format!("Failed to load command file '{}'", path.display()))?;

        let mut registry = CommandRegistry::new(self.build_limits());
        let count = register_file(&file, &mut registry)
            .with_context(|| format!("Failed to build commands from '{}'", path.display()))?;

        tracing::debug!(count, path = %path.display(), "loaded command file");
        Ok(registry)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let loaded = Config::load().context("Failed to load config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }

    let ctx = Context::new(&cli, loaded.config);
    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr subscriber. `--debug` overrides `RUST_LOG`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cmdtree=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
