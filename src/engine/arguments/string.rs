//! engine::arguments::string
//!
//! Free-text arguments, including the variable-arity ones.
//!
//! # Kinds
//!
//! - [`StringKind::Word`] - exactly one token
//! - [`StringKind::Quoted`] - one token, or a run of tokens from one that
//!   opens with `"` to one that closes with `"`; the quotes are stripped
//!   and the tokens rejoined with single spaces
//! - [`StringKind::Greedy`] - every remaining token
//!
//! Text arguments have no finite domain and offer no suggestions.

use super::{ArgumentType, ArgumentValue, ParseError};
use crate::core::tokens::TokenStream;
use crate::engine::context::SuggestionContext;

/// How many tokens a [`StringArgument`] may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// A single token.
    Word,
    /// A single token or a double-quoted phrase.
    Quoted,
    /// The rest of the line.
    Greedy,
}

/// Matches free text.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::{tokenize, TokenStream};
/// use cmdtree::engine::arguments::{ArgumentType, ArgumentValue, StringArgument};
///
/// let mut tokens = TokenStream::new(tokenize(r#""hello big world" !"#));
/// let value = StringArgument::quoted().parse(&mut tokens).unwrap();
/// assert_eq!(value, ArgumentValue::String("hello big world".to_string()));
/// assert_eq!(tokens.remaining(), ["!".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    /// A single-token string.
    pub fn word() -> Self {
        Self {
            kind: StringKind::Word,
        }
    }

    /// A single token or a double-quoted phrase.
    pub fn quoted() -> Self {
        Self {
            kind: StringKind::Quoted,
        }
    }

    /// Everything up to the end of the line.
    pub fn greedy() -> Self {
        Self {
            kind: StringKind::Greedy,
        }
    }

    /// The consumption kind.
    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// Number of tokens a quoted phrase spans, starting at the cursor.
    fn quoted_span(tokens: &TokenStream) -> Result<usize, ParseError> {
        let mut n = 0;
        while let Some(token) = tokens.peek_nth(n) {
            let closes = if n == 0 {
                token.len() > 1 && token.ends_with('"')
            } else {
                token.ends_with('"')
            };
            n += 1;
            if closes {
                return Ok(n);
            }
        }
        Err(ParseError::new("Unterminated quoted string"))
    }
}

impl ArgumentType for StringArgument {
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError> {
        let first = tokens
            .peek()
            .ok_or_else(|| ParseError::new("Expected text"))?
            .to_string();

        match self.kind {
            StringKind::Word => {
                tokens.advance();
                Ok(ArgumentValue::String(first))
            }
            StringKind::Quoted if first.starts_with('"') => {
                let span = Self::quoted_span(tokens)?;
                let cp = tokens.checkpoint();
                tokens.advance_by(span);
                let joined = tokens.consumed_since(cp).join(" ");
                let inner = &joined[1..joined.len() - 1];
                Ok(ArgumentValue::String(inner.to_string()))
            }
            StringKind::Quoted => {
                tokens.advance();
                Ok(ArgumentValue::String(first))
            }
            StringKind::Greedy => {
                let text = tokens.remaining().join(" ");
                tokens.advance_by(tokens.len());
                Ok(ArgumentValue::String(text))
            }
        }
    }

    fn suggestions(&self, _ctx: &mut SuggestionContext<'_>) {}

    fn usage(&self, name: &str) -> String {
        match self.kind {
            StringKind::Greedy => format!("<{}...>", name),
            StringKind::Word | StringKind::Quoted => format!("<{}>", name),
        }
    }
}
