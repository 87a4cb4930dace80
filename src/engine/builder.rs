//! engine::builder
//!
//! Fluent construction of command trees.
//!
//! # Architecture
//!
//! An [`ArgumentBuilder`] is the mutable, construction-time form of a node.
//! Every method takes the builder by value and hands it back, so a whole
//! tree is written as one expression. [`ArgumentBuilder::build`] validates
//! the tree and freezes it into an immutable [`ArgumentNode`] graph.
//!
//! # Validation
//!
//! Building fails with a [`BuildError`] when:
//! - an argument name is empty
//! - a sibling literal is shadowed by an earlier one (same text, or same
//!   text in any case when the earlier one ignores case)
//! - an integer range is inverted
//! - an auto-suggested integer range is wider than [`BuildLimits::max_suggestions`]
//!
//! # Example
//!
//! ```
//! use cmdtree::engine::builder::{argument, literal};
//! use cmdtree::engine::arguments::IntegerArgument;
//!
//! let tree = literal("page")
//!     .then(literal("help").executes(|ctx| ctx.reply("usage: page <n>")))
//!     .then(argument("n", IntegerArgument::new().min(1)).executes(|_| {}))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tree.children().len(), 2);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::arguments::{ArgumentType, LiteralArgument};
use super::context::{CommandContext, ExecutionContext};
use super::node::{ArgumentNode, Executor, Requirement};
use crate::core::types::TypeError;

/// Default cap on the number of values an auto-suggested argument may enumerate.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 1024;

/// Limits enforced while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildLimits {
    /// Largest domain an argument may enumerate as suggestions.
    pub max_suggestions: usize,
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// Errors from building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("argument name cannot be empty")]
    EmptyName,

    #[error("duplicate literal '{literal}' under '{parent}': the later one can never match")]
    DuplicateLiteral { parent: String, literal: String },

    #[error("invalid integer range: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("suggestion domain of {span} values exceeds the limit of {limit}")]
    SuggestionDomainTooLarge { span: u128, limit: usize },

    #[error(transparent)]
    InvalidCommandName(#[from] TypeError),
}

/// A node under construction.
pub struct ArgumentBuilder {
    name: String,
    argument: Box<dyn ArgumentType>,
    requirements: Vec<Requirement>,
    executor: Option<Executor>,
    children: Vec<ArgumentBuilder>,
}

/// Start a case-sensitive literal node.
pub fn literal(text: impl Into<String>) -> ArgumentBuilder {
    let text = text.into();
    ArgumentBuilder::new(text.clone(), LiteralArgument::new(text))
}

/// Start a literal node that matches regardless of case.
pub fn literal_ignore_case(text: impl Into<String>) -> ArgumentBuilder {
    let text = text.into();
    ArgumentBuilder::new(text.clone(), LiteralArgument::new(text).ignore_case())
}

/// Start a typed node whose value is captured under `name`.
pub fn argument(name: impl Into<String>, argument: impl ArgumentType + 'static) -> ArgumentBuilder {
    ArgumentBuilder::new(name, argument)
}

impl ArgumentBuilder {
    /// Start a node from a name and an argument type.
    pub fn new(name: impl Into<String>, argument: impl ArgumentType + 'static) -> Self {
        Self::from_boxed(name, Box::new(argument))
    }

    /// Start a node from an already boxed argument type.
    pub fn from_boxed(name: impl Into<String>, argument: Box<dyn ArgumentType>) -> Self {
        Self {
            name: name.into(),
            argument,
            requirements: Vec::new(),
            executor: None,
            children: Vec::new(),
        }
    }

    /// Append a child. Children are matched in the order they are added.
    pub fn then(mut self, child: ArgumentBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Gate traversal past this node; `message` is reported when it fails.
    pub fn requires(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.requirements.push(Requirement::new(message, predicate));
        self
    }

    /// Gate traversal past this node without a failure message.
    pub fn requires_silently(
        mut self,
        predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.requirements.push(Requirement::silent(predicate));
        self
    }

    /// Append a prebuilt requirement.
    pub fn requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Run `executor` when a command line ends at this node.
    ///
    /// A later call replaces an earlier executor.
    pub fn executes(
        mut self,
        executor: impl Fn(&mut ExecutionContext<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// The node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate with default limits and freeze the tree.
    pub fn build(self) -> Result<ArgumentNode, BuildError> {
        self.build_with(&BuildLimits::default())
    }

    /// Validate against `limits` and freeze the tree.
    pub fn build_with(self, limits: &BuildLimits) -> Result<ArgumentNode, BuildError> {
        if self.name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        self.argument.validate(limits)?;

        let mut exact: HashSet<String> = HashSet::new();
        let mut folded: HashSet<String> = HashSet::new();
        for child in &self.children {
            let Some(text) = child.argument.literal() else {
                continue;
            };
            let lower = text.to_lowercase();
            let ignores_case = child.argument.literal_ignores_case();
            let shadowed = folded.contains(&lower) || (!ignores_case && exact.contains(text));
            if shadowed {
                return Err(BuildError::DuplicateLiteral {
                    parent: self.name.clone(),
                    literal: text.to_string(),
                });
            }
            if ignores_case {
                folded.insert(lower);
            } else {
                exact.insert(text.to_string());
            }
        }

        let children = self
            .children
            .into_iter()
            .map(|child| child.build_with(limits))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ArgumentNode::new(
            self.name,
            self.argument,
            self.requirements,
            self.executor,
            children,
        ))
    }
}

impl fmt::Debug for ArgumentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentBuilder")
            .field("name", &self.name)
            .field("argument", &self.argument)
            .field("requirements", &self.requirements)
            .field("executable", &self.executor.is_some())
            .field("children", &self.children)
            .finish()
    }
}
