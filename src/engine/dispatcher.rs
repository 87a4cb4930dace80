//! engine::dispatcher
//!
//! The tree walk shared by execution and completion.
//!
//! # Algorithm
//!
//! Both traversals descend from the root one node per step, with the
//! remaining tokens and a context:
//!
//! 1. **Gate**: evaluate the node's requirements in order. The first one
//!    that fails halts the walk with [`Failure::Requirement`]; nothing
//!    below the node is parsed, executed, or suggested.
//! 2. **Terminal (execution)**: with no tokens left, run the node's
//!    executor, or halt with [`Failure::IncompleteCommand`] if it has none.
//! 3. **Terminal (suggestion)**: with only the final (possibly partial)
//!    token left, ask every usable child for suggestions, in declaration
//!    order, and stop.
//! 4. **Child selection**: try each child's `parse` in declaration order.
//!    The first success is descended into and no sibling is tried again.
//!    A failed parse is rolled back and the next sibling tried. If every
//!    child fails the walk halts with [`Failure::DispatchExhausted`],
//!    carrying the last parse error.
//!
//! # Invariants
//!
//! - The tree is only read; all state lives in the context and token stream
//! - Tokens are rolled back after every failed parse, even if the argument
//!   type itself misbehaved
//! - Typed values are captured in the context as their nodes are matched
//!
//! # Example
//!
//! ```
//! use cmdtree::core::tokens::TokenStream;
//! use cmdtree::engine::context::ExecutionContext;
//! use cmdtree::engine::dispatcher;
//! use cmdtree::engine::sender::BufferedSender;
//! use cmdtree::engine::{literal, Failure};
//!
//! let tree = literal("tp")
//!     .then(literal("here").executes(|ctx| ctx.reply("ok")))
//!     .build()
//!     .unwrap();
//!
//! let sender = BufferedSender::new("alice");
//! let mut ctx = ExecutionContext::new(&sender, "tp", vec!["there".to_string()]);
//! let mut tokens = TokenStream::new(vec!["there".to_string()]);
//!
//! let failure = dispatcher::execute(&tree, &mut tokens, &mut ctx).unwrap_err();
//! assert!(matches!(failure, Failure::DispatchExhausted { .. }));
//! ```

use tracing::{debug, trace};

use super::context::{CommandContext, ExecutionContext, ParsedArguments, SuggestionContext};
use super::failure::Failure;
use super::node::ArgumentNode;
use crate::core::tokens::TokenStream;

/// Walk `root` against `tokens` and run the executor the line ends at.
///
/// `tokens` holds the arguments after the command label. On success the
/// executor has run exactly once; on failure no executor has run.
pub fn execute(
    root: &ArgumentNode,
    tokens: &mut TokenStream,
    ctx: &mut ExecutionContext<'_>,
) -> Result<(), Failure> {
    let mut node = root;
    loop {
        check_requirements(node, &*ctx)?;

        if tokens.is_empty() {
            let Some(executor) = node.executor() else {
                debug!(node = node.name(), "command ends at a node without an executor");
                return Err(Failure::IncompleteCommand);
            };
            debug!(node = node.name(), "executing");
            executor(ctx);
            return Ok(());
        }

        node = select_child(node, tokens, ctx.arguments_mut())?;
    }
}

/// Walk `root` against `tokens` and gather completions for the last token.
///
/// `tokens` holds the arguments after the command label; its last token is
/// the one being completed. Suggestions are appended to `ctx`.
pub fn suggest(
    root: &ArgumentNode,
    tokens: &mut TokenStream,
    ctx: &mut SuggestionContext<'_>,
) -> Result<(), Failure> {
    let mut node = root;
    loop {
        check_requirements(node, &*ctx)?;

        match tokens.len() {
            0 => {
                // A variable-arity argument swallowed the partial token.
                return Ok(());
            }
            1 => {
                for child in node.children() {
                    if child.can_use(&*ctx) {
                        child.argument_type().suggestions(ctx);
                    } else {
                        trace!(child = child.name(), "hiding suggestions of gated child");
                    }
                }
                debug!(
                    node = node.name(),
                    count = ctx.suggestions().len(),
                    "collected suggestions"
                );
                return Ok(());
            }
            _ => node = select_child(node, tokens, ctx.arguments_mut())?,
        }
    }
}

fn check_requirements(node: &ArgumentNode, ctx: &dyn CommandContext) -> Result<(), Failure> {
    match node.first_unmet_requirement(ctx) {
        Some(requirement) => {
            debug!(
                node = node.name(),
                message = requirement.message(),
                "requirement not met"
            );
            Err(Failure::Requirement {
                message: requirement.message().map(String::from),
            })
        }
        None => Ok(()),
    }
}

/// Find the first child that parses, consuming its tokens and capturing its value.
fn select_child<'n>(
    node: &'n ArgumentNode,
    tokens: &mut TokenStream,
    arguments: &mut ParsedArguments,
) -> Result<&'n ArgumentNode, Failure> {
    let mut last_error = None;

    for child in node.children() {
        let checkpoint = tokens.checkpoint();
        match child.argument_type().parse(tokens) {
            Ok(value) => {
                trace!(child = child.name(), consumed = ?tokens.consumed_since(checkpoint), "matched");
                if !child.is_literal() {
                    arguments.insert(child.name(), value);
                }
                return Ok(child);
            }
            Err(err) => {
                tokens.restore(checkpoint);
                trace!(child = child.name(), error = %err, "rejected");
                last_error = Some(err);
            }
        }
    }

    debug!(
        node = node.name(),
        next = tokens.peek(),
        "no child accepted the remaining tokens"
    );
    Err(Failure::DispatchExhausted { last_error })
}
