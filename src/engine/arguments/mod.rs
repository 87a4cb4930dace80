//! engine::arguments
//!
//! Argument types: how a tree node consumes tokens and what it suggests.
//!
//! # Architecture
//!
//! Every node in a command tree owns one [`ArgumentType`]. During dispatch
//! the type is asked to `parse` the remaining tokens; during completion it
//! is asked for `suggestions` for the partially typed final token. Both
//! traversals call the same `parse`, so a line that completes a certain way
//! also dispatches that way.
//!
//! # Invariants
//!
//! - `parse` consumes tokens only on success, and exactly the tokens it matched
//! - `parse` is deterministic for a given token prefix
//! - `suggestions` never touches the token stream
//! - Error messages are user-facing and contain no internal state
//!
//! # Built-in types
//!
//! - [`LiteralArgument`] - a fixed word, optionally case-insensitive
//! - [`IntegerArgument`] - a bounded integer with an optional predicate
//! - [`BooleanArgument`] - `true` / `false`
//! - [`StringArgument`] - a word, a quoted phrase, or the rest of the line
//! - [`ChoiceArgument`] - one of a fixed set of values

mod boolean;
mod choice;
mod integer;
mod literal;
mod string;

pub use boolean::BooleanArgument;
pub use choice::ChoiceArgument;
pub use integer::IntegerArgument;
pub use literal::LiteralArgument;
pub use string::{StringArgument, StringKind};

use std::fmt;

use thiserror::Error;

use super::builder::{BuildError, BuildLimits};
use super::context::SuggestionContext;
use crate::core::tokens::TokenStream;

/// A user-facing parse failure.
///
/// The message is shown to the sender as-is when dispatch fails, so it
/// should describe the bad input, not the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    /// Create a parse error with a user-facing message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A value produced by a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// A matched literal, in its declared spelling.
    Literal(String),
    /// A parsed integer.
    Integer(i64),
    /// A parsed boolean.
    Boolean(bool),
    /// Free text (one or more tokens).
    String(String),
    /// One of a fixed set of values, in its declared spelling.
    Choice(String),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Literal(s) | ArgumentValue::String(s) | ArgumentValue::Choice(s) => {
                write!(f, "{}", s)
            }
            ArgumentValue::Integer(i) => write!(f, "{}", i),
            ArgumentValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Typed extraction of an [`ArgumentValue`].
///
/// # Example
///
/// ```
/// use cmdtree::engine::arguments::{ArgumentValue, FromArgument};
///
/// assert_eq!(i64::from_argument(&ArgumentValue::Integer(7)), Some(7));
/// assert_eq!(bool::from_argument(&ArgumentValue::Integer(7)), None);
/// ```
pub trait FromArgument: Sized {
    /// Convert the value, or `None` if it has a different shape.
    fn from_argument(value: &ArgumentValue) -> Option<Self>;
}

impl FromArgument for i64 {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromArgument for i32 {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        i64::from_argument(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl FromArgument for u32 {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        i64::from_argument(value).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromArgument for bool {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromArgument for String {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        match value {
            ArgumentValue::Literal(s) | ArgumentValue::String(s) | ArgumentValue::Choice(s) => {
                Some(s.clone())
            }
            ArgumentValue::Integer(_) | ArgumentValue::Boolean(_) => None,
        }
    }
}

impl FromArgument for ArgumentValue {
    fn from_argument(value: &ArgumentValue) -> Option<Self> {
        Some(value.clone())
    }
}

/// How a tree node consumes tokens and enumerates completions.
///
/// Implementations must be stateless or hold only configuration: one
/// instance is shared by every concurrent invocation of the tree.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::TokenStream;
/// use cmdtree::engine::arguments::{ArgumentType, IntegerArgument};
///
/// let arg = IntegerArgument::new().range(1, 10);
/// let mut tokens = TokenStream::new(vec!["11".to_string()]);
///
/// let err = arg.parse(&mut tokens).unwrap_err();
/// assert_eq!(err.message(), "Integer 11 is greater than the maximum value 10");
/// assert_eq!(tokens.len(), 1); // nothing consumed
/// ```
pub trait ArgumentType: Send + Sync + fmt::Debug {
    /// Consume the tokens this argument matches from the front of `tokens`.
    ///
    /// On failure the stream must be left exactly as it was.
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError>;

    /// Offer completions for `ctx.partial()`.
    fn suggestions(&self, ctx: &mut SuggestionContext<'_>);

    /// How this argument appears in a usage line.
    fn usage(&self, name: &str) -> String {
        format!("<{}>", name)
    }

    /// Check the configuration against build limits.
    fn validate(&self, _limits: &BuildLimits) -> Result<(), BuildError> {
        Ok(())
    }

    /// The fixed text, if this argument is a literal.
    fn literal(&self) -> Option<&str> {
        None
    }

    /// Whether the literal text matches regardless of case.
    fn literal_ignores_case(&self) -> bool {
        false
    }
}

/// Case-insensitive prefix match used by the built-in suggestion filters.
pub(crate) fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate
        .chars()
        .zip(prefix.chars())
        .all(|(c, p)| c.to_lowercase().eq(p.to_lowercase()))
        && candidate.chars().count() >= prefix.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod from_argument {
        use super::*;

        #[test]
        fn integer_narrowing() {
            let big = ArgumentValue::Integer(i64::from(i32::MAX) + 1);
            assert_eq!(i64::from_argument(&big), Some(i64::from(i32::MAX) + 1));
            assert_eq!(i32::from_argument(&big), None);
            assert_eq!(u32::from_argument(&ArgumentValue::Integer(-1)), None);
        }

        #[test]
        fn strings_from_text_values() {
            for value in [
                ArgumentValue::Literal("a".into()),
                ArgumentValue::String("a".into()),
                ArgumentValue::Choice("a".into()),
            ] {
                assert_eq!(String::from_argument(&value), Some("a".to_string()));
            }
            assert_eq!(String::from_argument(&ArgumentValue::Boolean(true)), None);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn renders_plain_values() {
            assert_eq!(ArgumentValue::Integer(-3).to_string(), "-3");
            assert_eq!(ArgumentValue::Boolean(false).to_string(), "false");
            assert_eq!(ArgumentValue::String("hi there".into()).to_string(), "hi there");
        }
    }

    mod prefix {
        use super::*;

        #[test]
        fn matches_case_insensitively() {
            assert!(starts_with_ignore_case("spawn", "sp"));
            assert!(starts_with_ignore_case("Spawn", "sP"));
            assert!(starts_with_ignore_case("spawn", ""));
        }

        #[test]
        fn rejects_longer_prefix_and_mismatch() {
            assert!(!starts_with_ignore_case("sp", "spawn"));
            assert!(!starts_with_ignore_case("spawn", "xy"));
        }
    }
}
