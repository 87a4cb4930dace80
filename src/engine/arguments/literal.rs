//! engine::arguments::literal
//!
//! A fixed word such as a subcommand name.

use super::{ArgumentType, ArgumentValue, ParseError};
use crate::core::tokens::TokenStream;
use crate::engine::context::SuggestionContext;

/// Matches exactly one token equal to a fixed text.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::TokenStream;
/// use cmdtree::engine::arguments::{ArgumentType, ArgumentValue, LiteralArgument};
///
/// let help = LiteralArgument::new("help").ignore_case();
/// let mut tokens = TokenStream::new(vec!["HELP".to_string()]);
/// assert_eq!(
///     help.parse(&mut tokens).unwrap(),
///     ArgumentValue::Literal("help".to_string())
/// );
/// assert!(tokens.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralArgument {
    text: String,
    case_insensitive: bool,
}

impl LiteralArgument {
    /// A case-sensitive literal.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_insensitive: false,
        }
    }

    /// Accept the token regardless of case.
    pub fn ignore_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// The declared text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether matching ignores case.
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn matches(&self, token: &str) -> bool {
        if self.case_insensitive {
            token.to_lowercase() == self.text.to_lowercase()
        } else {
            token == self.text
        }
    }
}

impl ArgumentType for LiteralArgument {
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError> {
        match tokens.peek() {
            Some(token) if self.matches(token) => {
                tokens.advance();
                Ok(ArgumentValue::Literal(self.text.clone()))
            }
            Some(token) => Err(ParseError::new(format!(
                "Expected '{}' but found '{}'",
                self.text, token
            ))),
            None => Err(ParseError::new(format!("Expected '{}'", self.text))),
        }
    }

    fn suggestions(&self, ctx: &mut SuggestionContext<'_>) {
        if ctx.matches_partial(&self.text) {
            ctx.add_suggestion(self.text.clone());
        }
    }

    fn usage(&self, _name: &str) -> String {
        self.text.clone()
    }

    fn literal(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn literal_ignores_case(&self) -> bool {
        self.case_insensitive
    }
}
