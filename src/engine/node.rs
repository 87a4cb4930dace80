//! engine::node
//!
//! The immutable command tree.
//!
//! # Architecture
//!
//! An [`ArgumentNode`] owns the argument type that decides whether it
//! matches, an ordered list of [`Requirement`]s that gate traversal past it,
//! an optional executor, and its children in declaration order. Nodes are
//! produced only by [`ArgumentBuilder::build`](super::builder::ArgumentBuilder::build)
//! and expose read-only accessors, so a built tree cannot change.
//!
//! # Invariants
//!
//! - No node, requirement list, or child list changes after build
//! - Children are matched in declaration order; the first match wins
//! - Requirements are evaluated in declaration order; the first failure wins
//! - Trees are `Send + Sync` and may be walked by many threads at once

use std::fmt;
use std::sync::Arc;

use super::arguments::ArgumentType;
use super::context::{CommandContext, ExecutionContext};

/// A gating predicate evaluated against the current context.
pub type Predicate = Arc<dyn Fn(&dyn CommandContext) -> bool + Send + Sync>;

/// The action run when a command line ends at a node.
pub type Executor = Arc<dyn Fn(&mut ExecutionContext<'_>) + Send + Sync>;

/// A named gate on traversal past a node.
///
/// # Example
///
/// ```
/// use cmdtree::engine::context::{CommandContext, ExecutionContext};
/// use cmdtree::engine::node::Requirement;
/// use cmdtree::engine::sender::BufferedSender;
///
/// let admin_only = Requirement::new("Admins only", |ctx: &dyn CommandContext| {
///     ctx.sender().has_permission("admin")
/// });
///
/// let sender = BufferedSender::new("guest");
/// let ctx = ExecutionContext::new(&sender, "ban", Vec::new());
/// assert!(!admin_only.test(&ctx));
/// assert_eq!(admin_only.message(), Some("Admins only"));
/// ```
#[derive(Clone)]
pub struct Requirement {
    message: Option<String>,
    predicate: Predicate,
}

impl Requirement {
    /// A requirement that reports `message` when it fails.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: Some(message.into()),
            predicate: Arc::new(predicate),
        }
    }

    /// A requirement that fails without a message.
    ///
    /// Useful for hiding a branch from senders who should not know it exists.
    pub fn silent(predicate: impl Fn(&dyn CommandContext) -> bool + Send + Sync + 'static) -> Self {
        Self {
            message: None,
            predicate: Arc::new(predicate),
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Evaluate the predicate.
    pub fn test(&self, ctx: &dyn CommandContext) -> bool {
        (self.predicate)(ctx)
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// One node of a built command tree.
pub struct ArgumentNode {
    name: String,
    argument: Box<dyn ArgumentType>,
    requirements: Vec<Requirement>,
    executor: Option<Executor>,
    children: Vec<ArgumentNode>,
}

impl ArgumentNode {
    pub(crate) fn new(
        name: String,
        argument: Box<dyn ArgumentType>,
        requirements: Vec<Requirement>,
        executor: Option<Executor>,
        children: Vec<ArgumentNode>,
    ) -> Self {
        Self {
            name,
            argument,
            requirements,
            executor,
            children,
        }
    }

    /// The node name: the text of a literal, or the key a typed value is
    /// captured under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument type that decides whether this node matches.
    pub fn argument_type(&self) -> &dyn ArgumentType {
        self.argument.as_ref()
    }

    /// Requirements in evaluation order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// The executor, if a command line may end here.
    pub fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    /// Children in match order.
    pub fn children(&self) -> &[ArgumentNode] {
        &self.children
    }

    /// Whether this node matches fixed text (and captures no value).
    pub fn is_literal(&self) -> bool {
        self.argument.literal().is_some()
    }

    /// Whether a command line may end at this node.
    pub fn is_executable(&self) -> bool {
        self.executor.is_some()
    }

    /// The first requirement that `ctx` fails, in declaration order.
    ///
    /// Requirements after the first failure are not evaluated.
    pub fn first_unmet_requirement(&self, ctx: &dyn CommandContext) -> Option<&Requirement> {
        self.requirements.iter().find(|r| !r.test(ctx))
    }

    /// Whether `ctx` passes every requirement.
    pub fn can_use(&self, ctx: &dyn CommandContext) -> bool {
        self.first_unmet_requirement(ctx).is_none()
    }

    /// The child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&ArgumentNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// How this node appears in a usage line.
    pub fn usage_token(&self) -> String {
        self.argument.usage(&self.name)
    }

    /// Every executable path through the tree, starting at this node.
    ///
    /// # Example
    ///
    /// ```
    /// use cmdtree::engine::{argument, literal, IntegerArgument};
    ///
    /// let tree = literal("tp")
    ///     .then(literal("here").executes(|_| {}))
    ///     .then(argument("x", IntegerArgument::new()).executes(|_| {}))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(tree.usage(), vec!["tp here", "tp <x>"]);
    /// ```
    pub fn usage(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.collect_usage("", &mut lines);
        lines
    }

    fn collect_usage(&self, prefix: &str, lines: &mut Vec<String>) {
        let path = if prefix.is_empty() {
            self.usage_token()
        } else {
            format!("{} {}", prefix, self.usage_token())
        };

        if self.is_executable() {
            lines.push(path.clone());
        }

        for child in &self.children {
            child.collect_usage(&path, lines);
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ArgumentNode::node_count).sum::<usize>()
    }
}

impl fmt::Debug for ArgumentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentNode")
            .field("name", &self.name)
            .field("argument", &self.argument)
            .field("requirements", &self.requirements)
            .field("executable", &self.is_executable())
            .field("children", &self.children)
            .finish()
    }
}
