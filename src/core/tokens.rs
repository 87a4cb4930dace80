//! core::tokens
//!
//! Token sequences consumed by the dispatcher.
//!
//! # Overview
//!
//! A raw command line is split into an ordered sequence of tokens. Index 0
//! is the command label, the rest are raw arguments. The dispatcher walks
//! the sequence front-to-back through a [`TokenStream`]: consuming a token
//! advances a cursor, and nothing is ever reordered.
//!
//! # Invariants
//!
//! - Consumed tokens are never handed out again
//! - `restore(checkpoint)` returns the stream to exactly the state it had
//!   when the checkpoint was taken
//!
//! # Example
//!
//! ```
//! use cmdtree::core::tokens::{tokenize, TokenStream};
//!
//! let mut tokens = TokenStream::new(tokenize("tp 3 4"));
//! assert_eq!(tokens.peek(), Some("tp"));
//!
//! let cp = tokens.checkpoint();
//! tokens.advance();
//! tokens.advance();
//! assert_eq!(tokens.remaining(), ["4".to_string()]);
//!
//! tokens.restore(cp);
//! assert_eq!(tokens.len(), 3);
//! ```

/// Split a raw line into tokens on whitespace.
///
/// Leading, trailing, and repeated whitespace produce no empty tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// Split a partially typed line into tokens for completion.
///
/// Identical to [`tokenize`], except that a line ending in whitespace gets
/// a final empty token: the user has finished the previous token and is
/// about to type the next one.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::tokenize_partial;
///
/// assert_eq!(tokenize_partial("tp he"), vec!["tp", "he"]);
/// assert_eq!(tokenize_partial("tp "), vec!["tp", ""]);
/// ```
pub fn tokenize_partial(line: &str) -> Vec<String> {
    let mut tokens = tokenize(line);
    if !tokens.is_empty() && line.ends_with(char::is_whitespace) {
        tokens.push(String::new());
    }
    tokens
}

/// A saved cursor position in a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// An ordered token sequence with a consumption cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
    cursor: usize,
}

impl TokenStream {
    /// Create a stream positioned at the first token.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Look at the next unconsumed token.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    /// Look `n` tokens ahead of the cursor without consuming anything.
    pub fn peek_nth(&self, n: usize) -> Option<&str> {
        self.tokens.get(self.cursor + n).map(String::as_str)
    }

    /// Consume the next token, returning it.
    pub fn advance(&mut self) -> Option<&str> {
        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;
        Some(token.as_str())
    }

    /// Consume up to `n` tokens.
    pub fn advance_by(&mut self, n: usize) {
        self.cursor = (self.cursor + n).min(self.tokens.len());
    }

    /// All unconsumed tokens, in order.
    pub fn remaining(&self) -> &[String] {
        &self.tokens[self.cursor..]
    }

    /// Number of unconsumed tokens.
    pub fn len(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// True when every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Save the current position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    /// Return to a saved position.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.0.min(self.tokens.len());
    }

    /// Tokens consumed since `checkpoint` was taken.
    pub fn consumed_since(&self, checkpoint: Checkpoint) -> &[String] {
        let start = checkpoint.0.min(self.cursor);
        &self.tokens[start..self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(tokens: &[&str]) -> TokenStream {
        TokenStream::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    mod tokenize {
        use super::super::*;

        #[test]
        fn splits_on_whitespace() {
            assert_eq!(tokenize("tp  3\t4"), vec!["tp", "3", "4"]);
        }

        #[test]
        fn empty_line_has_no_tokens() {
            assert!(tokenize("").is_empty());
            assert!(tokenize("   ").is_empty());
        }

        #[test]
        fn partial_adds_empty_token_after_trailing_space() {
            assert_eq!(tokenize_partial("tp 3 "), vec!["tp", "3", ""]);
        }

        #[test]
        fn partial_without_trailing_space_is_unchanged() {
            assert_eq!(tokenize_partial("tp 3"), vec!["tp", "3"]);
        }

        #[test]
        fn partial_of_blank_line_is_empty() {
            assert!(tokenize_partial("  ").is_empty());
        }
    }

    mod stream {
        use super::*;

        #[test]
        fn advance_consumes_front_to_back() {
            let mut tokens = stream(&["a", "b"]);
            assert_eq!(tokens.advance(), Some("a"));
            assert_eq!(tokens.advance(), Some("b"));
            assert_eq!(tokens.advance(), None);
            assert!(tokens.is_empty());
        }

        #[test]
        fn peek_does_not_consume() {
            let tokens = stream(&["a", "b"]);
            assert_eq!(tokens.peek(), Some("a"));
            assert_eq!(tokens.peek_nth(1), Some("b"));
            assert_eq!(tokens.peek_nth(2), None);
            assert_eq!(tokens.len(), 2);
        }

        #[test]
        fn restore_rewinds_to_checkpoint() {
            let mut tokens = stream(&["a", "b", "c"]);
            tokens.advance();
            let cp = tokens.checkpoint();
            tokens.advance_by(2);
            assert!(tokens.is_empty());
            assert_eq!(tokens.consumed_since(cp), ["b".to_string(), "c".to_string()]);
            tokens.restore(cp);
            assert_eq!(tokens.remaining(), ["b".to_string(), "c".to_string()]);
        }

        #[test]
        fn advance_by_saturates() {
            let mut tokens = stream(&["a"]);
            tokens.advance_by(5);
            assert!(tokens.is_empty());
        }
    }
}
