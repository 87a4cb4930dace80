//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--commands <file>`: Command file to load
//! - `--sender <name>` / `--permission <p>`: Who the command runs as
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmdtree - Build, dispatch, and complete command argument trees
#[derive(Parser, Debug)]
#[command(name = "cmdtree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command file to load (defaults to console.commands_file in config)
    #[arg(long, global = true, value_name = "FILE")]
    pub commands: Option<PathBuf>,

    /// Name of the sender commands run as (defaults to console.name in config)
    #[arg(long, global = true, value_name = "NAME")]
    pub sender: Option<String>,

    /// Grant a permission to the sender; repeatable
    #[arg(long = "permission", global = true, value_name = "PERMISSION")]
    pub permissions: Vec<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch one command line
    #[command(
        name = "run",
        long_about = "Dispatch one command line against the loaded command file.\n\n\
            The first token is the command label (name or alias); the rest are its \
            arguments. Messages the command sends back are printed one per line. \
            The exit status is 1 when the command fails.",
        after_help = "\
EXAMPLES:
    # Run a command
    cmdtree --commands commands.toml run tp 3 4

    # Run as a sender with a permission
    cmdtree --sender alice --permission tp.use run tp here

    # Quote a phrase argument
    cmdtree run say '\"hello there\"'"
    )]
    Run {
        /// Command label followed by its arguments
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Print completions for a partial command line
    #[command(
        name = "complete",
        long_about = "Print completions for a raw, possibly partial, command line.\n\n\
            The last token is the one being completed. A trailing space completes \
            the next token. While the first token is being typed, command labels \
            are completed.",
        after_help = "\
EXAMPLES:
    # Complete the first argument of tp
    cmdtree complete 'tp '

    # Complete a partially typed literal
    cmdtree complete 'spawn m'"
    )]
    Complete {
        /// The line typed so far
        #[arg(default_value = "", allow_hyphen_values = true)]
        line: String,
    },

    /// Load the command file and list every usage path
    Check,

    /// Read command lines from stdin
    #[command(
        name = "repl",
        long_about = "Read command lines from stdin and dispatch each one.\n\n\
            A line ending in '?' prints completions for the text before it instead \
            of running it. An empty line is skipped; end of input exits.",
        after_help = "\
EXAMPLES:
    # Interactive session
    cmdtree --commands commands.toml repl

    # Scripted session
    printf 'tp here\\ntp ?\\n' | cmdtree repl"
    )]
    Repl,

    /// Show the effective configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for cmdtree.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    cmdtree completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    cmdtree completion zsh >> ~/.zshrc

    # Fish
    cmdtree completion fish > ~/.config/fish/completions/cmdtree.fish

    # PowerShell
    cmdtree completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g. engine.suggestion_limit)
        key: String,
    },
    /// List all configuration values (the default)
    List,
    /// Print the path of the loaded config file
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
