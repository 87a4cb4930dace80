//! engine::context
//!
//! Per-invocation state threaded through a traversal.
//!
//! # Architecture
//!
//! A context is created for exactly one `dispatch` or `suggest` call and
//! dropped when it returns. It carries everything that changes while the
//! tree is walked: the typed values captured so far, the outcome of an
//! execution, or the suggestions gathered for a completion. The tree itself
//! is never written to, which is what lets many invocations share it.
//!
//! Two variants share a common base ([`Invocation`]):
//!
//! - [`ExecutionContext`] - adds the [`Outcome`] of a dispatch
//! - [`SuggestionContext`] - adds the ordered, duplicate-free suggestions
//!
//! Requirement predicates and failure handlers see either variant through
//! the [`CommandContext`] trait.
//!
//! # Invariants
//!
//! - A context is never shared between calls or retained by the tree
//! - Suggestions are kept in insertion order without duplicates

use std::collections::HashSet;

use super::arguments::{starts_with_ignore_case, ArgumentValue, FromArgument};
use super::failure::Failure;
use super::sender::Sender;

/// Which traversal a context belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full parse followed by execution.
    Execution,
    /// Partial parse followed by completion.
    Suggestion,
}

/// Read access shared by both context variants.
pub trait CommandContext {
    /// The sender the command runs on behalf of.
    fn sender(&self) -> &dyn Sender;

    /// The label the command was invoked with (name or alias).
    fn label(&self) -> &str;

    /// Raw arguments after the label, exactly as given.
    fn raw_args(&self) -> &[String];

    /// Typed values captured along the matched path so far.
    fn arguments(&self) -> &ParsedArguments;

    /// Which traversal is running.
    fn mode(&self) -> Mode;
}

/// Typed values captured by non-literal nodes, in match order.
///
/// # Example
///
/// ```
/// use cmdtree::engine::arguments::ArgumentValue;
/// use cmdtree::engine::context::ParsedArguments;
///
/// let mut args = ParsedArguments::default();
/// args.insert("x", ArgumentValue::Integer(3));
///
/// assert_eq!(args.get::<i64>("x"), Some(3));
/// assert_eq!(args.get::<bool>("x"), None);
/// assert_eq!(args.get::<i64>("y"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    values: Vec<(String, ArgumentValue)>,
}

impl ParsedArguments {
    /// Record a value. A later value with the same name shadows an earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.push((name.into(), value));
    }

    /// The raw value captured under `name`.
    pub fn value(&self, name: &str) -> Option<&ArgumentValue> {
        self.values
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The value captured under `name`, converted to `T`.
    pub fn get<T: FromArgument>(&self, name: &str) -> Option<T> {
        self.value(name).and_then(T::from_argument)
    }

    /// Whether a value was captured under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// All captured values in match order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of captured values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// State common to both context variants.
pub struct Invocation<'a> {
    sender: &'a dyn Sender,
    label: String,
    raw_args: Vec<String>,
    arguments: ParsedArguments,
}

impl<'a> Invocation<'a> {
    /// Create the base state for one call.
    pub fn new(sender: &'a dyn Sender, label: impl Into<String>, raw_args: Vec<String>) -> Self {
        Self {
            sender,
            label: label.into(),
            raw_args,
            arguments: ParsedArguments::default(),
        }
    }
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("sender", &self.sender.name())
            .field("label", &self.label)
            .field("raw_args", &self.raw_args)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Nothing has run yet.
    #[default]
    Pending,
    /// An executor was reached and invoked.
    Executed,
    /// The walk halted before reaching an executor.
    Failed(Failure),
}

impl Outcome {
    /// Whether an executor ran.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Executed)
    }

    /// Whether the walk failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Pending | Outcome::Executed => None,
        }
    }
}

/// Context for a full parse and execution.
#[derive(Debug)]
pub struct ExecutionContext<'a> {
    base: Invocation<'a>,
    outcome: Outcome,
}

impl<'a> ExecutionContext<'a> {
    /// Create a fresh execution context.
    pub fn new(sender: &'a dyn Sender, label: impl Into<String>, raw_args: Vec<String>) -> Self {
        Self {
            base: Invocation::new(sender, label, raw_args),
            outcome: Outcome::Pending,
        }
    }

    /// Send a line of feedback to the sender.
    pub fn reply(&self, message: impl AsRef<str>) {
        self.base.sender.send_message(message.as_ref());
    }

    /// The outcome so far.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut ParsedArguments {
        &mut self.base.arguments
    }

    /// Consume the context, returning its outcome.
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }
}

impl CommandContext for ExecutionContext<'_> {
    fn sender(&self) -> &dyn Sender {
        self.base.sender
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn raw_args(&self) -> &[String] {
        &self.base.raw_args
    }

    fn arguments(&self) -> &ParsedArguments {
        &self.base.arguments
    }

    fn mode(&self) -> Mode {
        Mode::Execution
    }
}

/// Context for a partial parse that gathers completions.
///
/// The partial token is the last raw argument (or empty when there are
/// none): the token the user is currently typing.
#[derive(Debug)]
pub struct SuggestionContext<'a> {
    base: Invocation<'a>,
    partial: String,
    suggestions: Vec<String>,
    seen: HashSet<String>,
}

impl<'a> SuggestionContext<'a> {
    /// Create a fresh suggestion context.
    pub fn new(sender: &'a dyn Sender, label: impl Into<String>, raw_args: Vec<String>) -> Self {
        let partial = raw_args.last().cloned().unwrap_or_default();
        Self {
            base: Invocation::new(sender, label, raw_args),
            partial,
            suggestions: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// The token being completed.
    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Whether `candidate` extends the partial token (case-insensitive).
    pub fn matches_partial(&self, candidate: &str) -> bool {
        starts_with_ignore_case(candidate, &self.partial)
    }

    /// Append a suggestion unless it is already present.
    ///
    /// Returns `true` if the suggestion was added.
    pub fn add_suggestion(&mut self, suggestion: impl Into<String>) -> bool {
        let suggestion = suggestion.into();
        if self.seen.contains(&suggestion) {
            return false;
        }
        self.seen.insert(suggestion.clone());
        self.suggestions.push(suggestion);
        true
    }

    /// Suggestions gathered so far.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut ParsedArguments {
        &mut self.base.arguments
    }

    /// Consume the context, returning its suggestions.
    pub fn into_suggestions(self) -> Vec<String> {
        self.suggestions
    }
}

impl CommandContext for SuggestionContext<'_> {
    fn sender(&self) -> &dyn Sender {
        self.base.sender
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn raw_args(&self) -> &[String] {
        &self.base.raw_args
    }

    fn arguments(&self) -> &ParsedArguments {
        &self.base.arguments
    }

    fn mode(&self) -> Mode {
        Mode::Suggestion
    }
}
