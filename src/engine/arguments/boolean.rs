//! engine::arguments::boolean

use super::{ArgumentType, ArgumentValue, ParseError};
use crate::core::tokens::TokenStream;
use crate::engine::context::SuggestionContext;

/// Matches one token spelling `true` or `false`, in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanArgument;

impl BooleanArgument {
    /// Create a boolean argument.
    pub fn new() -> Self {
        Self
    }
}

impl ArgumentType for BooleanArgument {
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError> {
        let token = tokens
            .peek()
            .ok_or_else(|| ParseError::new("Expected a boolean"))?;

        let value = match token.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(ParseError::new(format!("Invalid boolean: {}", token))),
        };

        tokens.advance();
        Ok(ArgumentValue::Boolean(value))
    }

    fn suggestions(&self, ctx: &mut SuggestionContext<'_>) {
        for candidate in ["true", "false"] {
            if ctx.matches_partial(candidate) {
                ctx.add_suggestion(candidate);
            }
        }
    }
}
