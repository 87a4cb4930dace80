//! engine::arguments::choice
//!
//! One value out of a fixed, ordered set (game modes, colours, ...).
//! Unlike a group of sibling literals, a choice captures which value was
//! given so one executor can serve all of them.

use super::{ArgumentType, ArgumentValue, ParseError};
use crate::core::tokens::TokenStream;
use crate::engine::context::SuggestionContext;

/// Matches one token equal to any of a fixed set of values.
///
/// Matching ignores case; the parsed value is the declared spelling.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::TokenStream;
/// use cmdtree::engine::arguments::{ArgumentType, ArgumentValue, ChoiceArgument};
///
/// let mode = ChoiceArgument::new(["survival", "creative"]);
/// let mut tokens = TokenStream::new(vec!["Creative".to_string()]);
/// assert_eq!(
///     mode.parse(&mut tokens).unwrap(),
///     ArgumentValue::Choice("creative".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceArgument {
    choices: Vec<String>,
}

impl ChoiceArgument {
    /// Create a choice over `choices`, in suggestion order.
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// The declared values.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

impl ArgumentType for ChoiceArgument {
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError> {
        let token = tokens
            .peek()
            .ok_or_else(|| ParseError::new("Expected a value"))?;

        let lowered = token.to_lowercase();
        let Some(choice) = self
            .choices
            .iter()
            .find(|c| c.to_lowercase() == lowered)
            .cloned()
        else {
            return Err(ParseError::new(format!(
                "Invalid choice: {} (expected one of: {})",
                token,
                self.choices.join(", ")
            )));
        };

        tokens.advance();
        Ok(ArgumentValue::Choice(choice))
    }

    fn suggestions(&self, ctx: &mut SuggestionContext<'_>) {
        for choice in &self.choices {
            if ctx.matches_partial(choice) {
                ctx.add_suggestion(choice.clone());
            }
        }
    }

    fn usage(&self, _name: &str) -> String {
        format!("<{}>", self.choices.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_value_with_listing() {
        let mode = ChoiceArgument::new(["survival", "creative"]);
        let mut tokens = TokenStream::new(vec!["hardcore".into()]);
        let err = mode.parse(&mut tokens).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid choice: hardcore (expected one of: survival, creative)"
        );
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn usage_lists_choices() {
        let mode = ChoiceArgument::new(["a", "b"]);
        assert_eq!(mode.usage("mode"), "<a|b>");
    }
}
