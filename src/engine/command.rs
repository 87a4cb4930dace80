//! engine::command
//!
//! A named command: one frozen tree plus the two entry points a host calls.
//!
//! # Architecture
//!
//! [`CommandBuilder`] wraps the root [`ArgumentBuilder`] of a command. The
//! root is a case-insensitive literal of the command name, so aliases and
//! mixed-case labels all land on the same tree. Building yields a
//! [`Command`], which is cheap to clone and safe to share between threads.
//!
//! The host resolves the label (see [`CommandRegistry`]) and hands the
//! remaining arguments to [`Command::on_command`] or
//! [`Command::on_tab_complete`]. Each call gets a fresh context; the
//! optional failure handler sees at most one failure per call.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::builder::{literal_ignore_case, ArgumentBuilder, BuildError, BuildLimits};
use super::context::{CommandContext, ExecutionContext, Outcome, SuggestionContext};
use super::dispatcher;
use super::failure::{auto_failure_handler, Failure, FailureHandler};
use super::node::{ArgumentNode, Requirement};
use super::registry::{CommandRegistry, RegistryError};
use super::sender::Sender;
use crate::core::tokens::TokenStream;
use crate::core::types::CommandName;

/// Builds a [`Command`].
///
/// # Example
///
/// ```
/// use cmdtree::engine::{literal, BufferedSender, CommandBuilder};
///
/// let command = CommandBuilder::new("spawn")
///     .aliases(["sp"])
///     .auto_failure_handler()
///     .then(literal("mob").executes(|ctx| ctx.reply("spawned")))
///     .build()
///     .unwrap();
///
/// let sender = BufferedSender::new("alice");
/// assert!(command.on_command(&sender, "sp", &["mob".to_string()]).is_success());
/// assert!(command.on_command(&sender, "spawn", &[]).is_failed());
/// assert_eq!(sender.messages(), vec!["spawned", "Unknown or incomplete command"]);
/// ```
pub struct CommandBuilder {
    name: String,
    aliases: Vec<String>,
    description: Option<String>,
    failure_handler: Option<FailureHandler>,
    root: ArgumentBuilder,
}

impl CommandBuilder {
    /// Start a command named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            root: literal_ignore_case(name.to_lowercase()),
            name,
            aliases: Vec::new(),
            description: None,
            failure_handler: None,
        }
    }

    /// Additional labels the command answers to.
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// One-line description shown in listings.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Receive every failure of this command.
    pub fn on_fail(
        mut self,
        handler: impl Fn(&dyn CommandContext, &Failure) + Send + Sync + 'static,
    ) -> Self {
        self.failure_handler = Some(Arc::new(handler));
        self
    }

    /// Forward failure messages to the sender.
    ///
    /// See [`auto_failure_handler`].
    pub fn auto_failure_handler(mut self) -> Self {
        self.failure_handler = Some(auto_failure_handler());
        self
    }

    /// Append a child to the root.
    pub fn then(mut self, child: ArgumentBuilder) -> Self {
        self.root = self.root.then(child);
        self
    }

    /// Gate the whole command; `message` is reported when it fails.
    pub fn requires(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.root = self.root.requires(message, predicate);
        self
    }

    /// Gate the whole command without a failure message.
    pub fn requires_silently(
        mut self,
        predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.root = self.root.requires_silently(predicate);
        self
    }

    /// Append a prebuilt requirement to the root.
    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.root = self.root.requirement(requirement);
        self
    }

    /// Run `executor` when the command is invoked without arguments.
    pub fn executes(
        mut self,
        executor: impl Fn(&mut ExecutionContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.root = self.root.executes(executor);
        self
    }

    /// Build with default limits.
    pub fn build(self) -> Result<Command, BuildError> {
        self.build_with(&BuildLimits::default())
    }

    /// Validate the name, aliases, and tree against `limits`.
    pub fn build_with(self, limits: &BuildLimits) -> Result<Command, BuildError> {
        let name = CommandName::new(self.name)?;
        let aliases = self
            .aliases
            .into_iter()
            .map(CommandName::new)
            .collect::<Result<Vec<_>, _>>()?;
        let root = self.root.build_with(limits)?;

        debug!(command = %name, nodes = root.node_count(), "built command tree");

        Ok(Command {
            inner: Arc::new(CommandInner {
                name,
                aliases,
                description: self.description,
                failure_handler: self.failure_handler,
                root,
            }),
        })
    }

    /// Build against the registry's limits and register the result.
    pub fn register(self, registry: &mut CommandRegistry) -> Result<Command, RegistryError> {
        let command = self.build_with(registry.limits())?;
        registry.register(command.clone())?;
        Ok(command)
    }
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("failure_handler", &self.failure_handler.is_some())
            .field("root", &self.root)
            .finish()
    }
}

struct CommandInner {
    name: CommandName,
    aliases: Vec<CommandName>,
    description: Option<String>,
    failure_handler: Option<FailureHandler>,
    root: ArgumentNode,
}

/// A built command. Clones share the same tree.
#[derive(Clone)]
pub struct Command {
    inner: Arc<CommandInner>,
}

impl Command {
    /// The primary name.
    pub fn name(&self) -> &CommandName {
        &self.inner.name
    }

    /// Alternative labels.
    pub fn aliases(&self) -> &[CommandName] {
        &self.inner.aliases
    }

    /// The primary name followed by every alias.
    pub fn labels(&self) -> impl Iterator<Item = &CommandName> {
        std::iter::once(&self.inner.name).chain(self.inner.aliases.iter())
    }

    /// The description, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// The root of the frozen tree.
    pub fn root(&self) -> &ArgumentNode {
        &self.inner.root
    }

    /// Every executable path, starting with the command name.
    pub fn usage(&self) -> Vec<String> {
        self.inner.root.usage()
    }

    /// Dispatch `args` (everything after the label) on behalf of `sender`.
    #[instrument(skip_all, fields(command = %self.inner.name, label = label, args = args.len()))]
    pub fn on_command(&self, sender: &dyn Sender, label: &str, args: &[String]) -> Outcome {
        let mut ctx = ExecutionContext::new(sender, label, args.to_vec());
        let mut tokens = TokenStream::new(args.to_vec());

        match dispatcher::execute(&self.inner.root, &mut tokens, &mut ctx) {
            Ok(()) => ctx.set_outcome(Outcome::Executed),
            Err(failure) => {
                debug!(kind = failure.kind().as_str(), "dispatch failed");
                self.report(&ctx, &failure);
                ctx.set_outcome(Outcome::Failed(failure));
            }
        }
        ctx.into_outcome()
    }

    /// Complete the last of `args` (everything after the label).
    ///
    /// An empty `args` yields nothing: there is no token to complete yet.
    #[instrument(skip_all, fields(command = %self.inner.name, label = label, args = args.len()))]
    pub fn on_tab_complete(&self, sender: &dyn Sender, label: &str, args: &[String]) -> Vec<String> {
        let mut ctx = SuggestionContext::new(sender, label, args.to_vec());
        let mut tokens = TokenStream::new(args.to_vec());

        if let Err(failure) = dispatcher::suggest(&self.inner.root, &mut tokens, &mut ctx) {
            debug!(kind = failure.kind().as_str(), "suggestion walk halted");
            self.report(&ctx, &failure);
        }
        ctx.into_suggestions()
    }

    fn report(&self, ctx: &dyn CommandContext, failure: &Failure) {
        if let Some(handler) = &self.inner.failure_handler {
            handler(ctx, failure);
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.inner.name)
            .field("aliases", &self.inner.aliases)
            .field("description", &self.inner.description)
            .field("nodes", &self.inner.root.node_count())
            .finish()
    }
}
