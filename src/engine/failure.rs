//! engine::failure
//!
//! Abnormal halts of a traversal and the handler that reports them.
//!
//! # Taxonomy
//!
//! - A [`ParseError`] is produced by a single argument type. It never
//!   halts a walk on its own; the dispatcher moves on to the next sibling.
//! - [`Failure::Requirement`] - a gating predicate returned false
//! - [`Failure::DispatchExhausted`] - no child accepted the remaining tokens;
//!   carries the last sibling's parse error
//! - [`Failure::IncompleteCommand`] - tokens ran out at a node without an
//!   executor
//!
//! Every failure is delivered to the command's single [`FailureHandler`]
//! together with the context it happened in. Nothing is retried: parsing is
//! deterministic, so a retry would fail the same way.

use std::sync::Arc;

use thiserror::Error;

use super::arguments::ParseError;
use super::context::{CommandContext, Mode};

/// Message reported when nothing more specific is known.
pub const UNKNOWN_OR_INCOMPLETE: &str = "Unknown or incomplete command";

/// Why a traversal halted before reaching an executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// A requirement predicate returned false.
    #[error("{}", .message.as_deref().unwrap_or("Requirement not met"))]
    Requirement {
        /// The requirement's message; `None` for a silent gate.
        message: Option<String>,
    },

    /// No child of the current node accepted the remaining tokens.
    #[error("{}", .last_error.as_ref().map_or(UNKNOWN_OR_INCOMPLETE, ParseError::message))]
    DispatchExhausted {
        /// The parse error of the last child tried, if any child was tried.
        last_error: Option<ParseError>,
    },

    /// Tokens ran out at a node that has no executor.
    #[error("Unknown or incomplete command")]
    IncompleteCommand,
}

/// The kind of a [`Failure`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// See [`Failure::Requirement`].
    Requirement,
    /// See [`Failure::DispatchExhausted`].
    DispatchExhausted,
    /// See [`Failure::IncompleteCommand`].
    IncompleteCommand,
}

impl FailureKind {
    /// Stable lowercase identifier, used in machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Requirement => "requirement",
            FailureKind::DispatchExhausted => "dispatch_exhausted",
            FailureKind::IncompleteCommand => "incomplete_command",
        }
    }
}

impl Failure {
    /// The message to surface, or `None` for a silent requirement.
    pub fn message(&self) -> Option<String> {
        match self {
            Failure::Requirement { message } => message.clone(),
            Failure::DispatchExhausted { .. } | Failure::IncompleteCommand => {
                Some(self.to_string())
            }
        }
    }

    /// The payload-free kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Requirement { .. } => FailureKind::Requirement,
            Failure::DispatchExhausted { .. } => FailureKind::DispatchExhausted,
            Failure::IncompleteCommand => FailureKind::IncompleteCommand,
        }
    }
}

/// Receives every failure of a command, at most once per invocation.
pub type FailureHandler = Arc<dyn Fn(&dyn CommandContext, &Failure) + Send + Sync>;

/// A handler that forwards failure messages to the sender.
///
/// Silent requirements (no message) are not reported, and nothing is
/// reported while suggestions are being computed: the user is still typing.
///
/// # Example
///
/// ```
/// use cmdtree::engine::context::ExecutionContext;
/// use cmdtree::engine::failure::{auto_failure_handler, Failure};
/// use cmdtree::engine::sender::BufferedSender;
///
/// let sender = BufferedSender::new("alice");
/// let ctx = ExecutionContext::new(&sender, "tp", Vec::new());
/// let handler = auto_failure_handler();
///
/// handler(&ctx, &Failure::IncompleteCommand);
/// handler(&ctx, &Failure::Requirement { message: None });
/// assert_eq!(sender.messages(), vec!["Unknown or incomplete command".to_string()]);
/// ```
pub fn auto_failure_handler() -> FailureHandler {
    Arc::new(|ctx: &dyn CommandContext, failure: &Failure| {
        if ctx.mode() == Mode::Suggestion {
            return;
        }
        if let Some(message) = failure.message() {
            ctx.sender().send_message(&message);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::context::SuggestionContext;
    use crate::engine::sender::BufferedSender;

    mod messages {
        use super::*;

        #[test]
        fn requirement_message_is_passed_through() {
            let failure = Failure::Requirement {
                message: Some("No permission".into()),
            };
            assert_eq!(failure.message().as_deref(), Some("No permission"));
            assert_eq!(failure.kind(), FailureKind::Requirement);
        }

        #[test]
        fn silent_requirement_has_no_message() {
            let failure = Failure::Requirement { message: None };
            assert_eq!(failure.message(), None);
            assert_eq!(failure.to_string(), "Requirement not met");
        }

        #[test]
        fn exhausted_reports_last_parse_error() {
            let failure = Failure::DispatchExhausted {
                last_error: Some(ParseError::new("Invalid integer: abc")),
            };
            assert_eq!(failure.message().as_deref(), Some("Invalid integer: abc"));
        }

        #[test]
        fn exhausted_without_error_falls_back() {
            let failure = Failure::DispatchExhausted { last_error: None };
            assert_eq!(failure.message().as_deref(), Some(UNKNOWN_OR_INCOMPLETE));
        }

        #[test]
        fn kind_identifiers_are_stable() {
            assert_eq!(FailureKind::Requirement.as_str(), "requirement");
            assert_eq!(FailureKind::DispatchExhausted.as_str(), "dispatch_exhausted");
            assert_eq!(FailureKind::IncompleteCommand.as_str(), "incomplete_command");
        }
    }

    mod auto_handler {
        use super::*;

        #[test]
        fn ignores_suggestion_mode() {
            let sender = BufferedSender::new("a");
            let ctx = SuggestionContext::new(&sender, "tp", Vec::new());
            auto_failure_handler()(&ctx, &Failure::IncompleteCommand);
            assert!(sender.messages().is_empty());
        }
    }
}
