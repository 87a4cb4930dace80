//! engine::registry
//!
//! The set of commands a host has registered, keyed by label.
//!
//! # Lifecycle
//!
//! A registry is created explicitly with [`CommandRegistry::new`] when the
//! host starts and closed with [`CommandRegistry::teardown`] when it shuts
//! down. It is an ordinary value: hosts own it (or share it behind their own
//! lock) and hand it to whatever needs to dispatch. Nothing here is global.
//!
//! # Lookup
//!
//! Labels are case-insensitive. Every command answers to its primary name
//! and its aliases; no label may belong to two commands.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, info};

use super::builder::{BuildError, BuildLimits};
use super::command::Command;
use super::context::{Outcome, SuggestionContext};
use super::sender::Sender;
use crate::core::tokens::{tokenize, tokenize_partial};
use crate::core::types::{CommandName, TypeError};

/// Largest edit distance still offered as a "did you mean" hint.
const MAX_HINT_DISTANCE: usize = 3;

/// Errors from registering or resolving commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown command '{label}'{}", hint(.suggestion))]
    UnknownCommand {
        label: String,
        suggestion: Option<String>,
    },

    #[error("label '{label}' is already registered")]
    Duplicate { label: String },

    #[error("registry has been torn down")]
    Closed,

    #[error("no command given")]
    EmptyInput,

    #[error(transparent)]
    InvalidName(#[from] TypeError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

fn hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Registered commands.
///
/// # Example
///
/// ```
/// use cmdtree::engine::{literal, BufferedSender, BuildLimits, CommandBuilder, CommandRegistry};
///
/// let mut registry = CommandRegistry::new(BuildLimits::default());
/// CommandBuilder::new("spawn")
///     .then(literal("mob").executes(|ctx| ctx.reply("spawned")))
///     .register(&mut registry)
///     .unwrap();
///
/// let sender = BufferedSender::new("alice");
/// assert!(registry.dispatch_line("SPAWN mob", &sender).unwrap().is_success());
/// assert_eq!(registry.suggest_line("spawn m", &sender).unwrap(), vec!["mob"]);
///
/// registry.teardown();
/// assert!(registry.dispatch_line("spawn mob", &sender).is_err());
/// ```
#[derive(Debug)]
pub struct CommandRegistry {
    limits: BuildLimits,
    commands: BTreeMap<CommandName, Command>,
    labels: HashMap<CommandName, CommandName>,
    open: bool,
}

impl CommandRegistry {
    /// Open an empty registry whose commands are built against `limits`.
    pub fn new(limits: BuildLimits) -> Self {
        debug!(max_suggestions = limits.max_suggestions, "registry opened");
        Self {
            limits,
            commands: BTreeMap::new(),
            labels: HashMap::new(),
            open: true,
        }
    }

    /// Limits new commands are built against.
    pub fn limits(&self) -> &BuildLimits {
        &self.limits
    }

    /// Whether [`teardown`](Self::teardown) has not been called yet.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Add a built command under its name and aliases.
    ///
    /// Fails without changing the registry if any label is taken.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if !self.open {
            return Err(RegistryError::Closed);
        }

        let mut pending: Vec<&CommandName> = Vec::new();
        for label in command.labels() {
            if self.labels.contains_key(label) || pending.contains(&label) {
                return Err(RegistryError::Duplicate {
                    label: label.to_string(),
                });
            }
            pending.push(label);
        }

        for label in command.labels() {
            self.labels.insert(label.clone(), command.name().clone());
        }
        info!(command = %command.name(), aliases = command.aliases().len(), "registered command");
        self.commands.insert(command.name().clone(), command);
        Ok(())
    }

    /// The command answering to `label`, ignoring case.
    pub fn lookup(&self, label: &str) -> Option<&Command> {
        let label = CommandName::new(label).ok()?;
        let name = self.labels.get(&label)?;
        self.commands.get(name)
    }

    /// Registered commands, sorted by primary name.
    pub fn list(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Dispatch `args` to the command answering to `label`.
    pub fn dispatch(
        &self,
        sender: &dyn Sender,
        label: &str,
        args: &[String],
    ) -> Result<Outcome, RegistryError> {
        let command = self.resolve(label)?;
        Ok(command.on_command(sender, label, args))
    }

    /// Completions for the last of `args` under the command answering to `label`.
    ///
    /// An unknown label completes to nothing.
    pub fn suggest(
        &self,
        sender: &dyn Sender,
        label: &str,
        args: &[String],
    ) -> Result<Vec<String>, RegistryError> {
        if !self.open {
            return Err(RegistryError::Closed);
        }
        Ok(self
            .lookup(label)
            .map(|command| command.on_tab_complete(sender, label, args))
            .unwrap_or_default())
    }

    /// Tokenize a raw line and dispatch it.
    pub fn dispatch_line(&self, line: &str, sender: &dyn Sender) -> Result<Outcome, RegistryError> {
        let tokens = tokenize(line);
        let Some((label, args)) = tokens.split_first() else {
            return Err(RegistryError::EmptyInput);
        };
        self.dispatch(sender, label, args)
    }

    /// Completions for a raw, possibly partial, line.
    ///
    /// While the first token is still being typed, the labels of commands
    /// the sender may use are completed instead.
    pub fn suggest_line(&self, line: &str, sender: &dyn Sender) -> Result<Vec<String>, RegistryError> {
        if !self.open {
            return Err(RegistryError::Closed);
        }
        let tokens = tokenize_partial(line);
        match tokens.split_first() {
            None => Ok(self.complete_label("", sender)),
            Some((label, [])) => Ok(self.complete_label(label, sender)),
            Some((label, args)) => self.suggest(sender, label, args),
        }
    }

    /// Remove every command and refuse further use.
    ///
    /// Calling it again is a no-op.
    pub fn teardown(&mut self) {
        if self.open {
            info!(commands = self.commands.len(), "registry torn down");
        }
        self.commands.clear();
        self.labels.clear();
        self.open = false;
    }

    fn resolve(&self, label: &str) -> Result<&Command, RegistryError> {
        if !self.open {
            return Err(RegistryError::Closed);
        }
        self.lookup(label).ok_or_else(|| {
            debug!(label, "unknown command");
            RegistryError::UnknownCommand {
                label: label.to_string(),
                suggestion: self.similar_label(label),
            }
        })
    }

    fn complete_label(&self, partial: &str, sender: &dyn Sender) -> Vec<String> {
        let mut ctx = SuggestionContext::new(sender, partial, vec![partial.to_string()]);
        let mut usable = Vec::new();
        for command in self.commands.values() {
            if command.root().can_use(&ctx) {
                usable.extend(command.labels().map(|l| l.to_string()));
            }
        }
        usable.sort();
        for label in usable {
            if ctx.matches_partial(&label) {
                ctx.add_suggestion(label);
            }
        }
        ctx.into_suggestions()
    }

    /// A known label close to `label`: a prefix match first, then the
    /// nearest by edit distance.
    fn similar_label(&self, label: &str) -> Option<String> {
        let lower = label.to_lowercase();
        let mut known: Vec<&str> = self.labels.keys().map(CommandName::as_str).collect();
        known.sort_unstable();

        if let Some(found) = known.iter().find(|k| k.starts_with(&lower)) {
            return Some(found.to_string());
        }

        known
            .iter()
            .map(|k| (levenshtein(&lower, k), *k))
            .filter(|(distance, _)| *distance <= MAX_HINT_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, k)| k.to_string())
    }
}

/// Edit distance between two strings, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, a_ch) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
