//! engine::arguments::integer
//!
//! Bounded integer arguments.
//!
//! # Suggestions
//!
//! Integer suggestions are opt-in through [`IntegerArgument::auto_suggest`]
//! and enumerate every value in `[min, max]` that passes the predicate. The
//! enumeration is bounded at build time: a tree whose auto-suggested range
//! is wider than [`BuildLimits::max_suggestions`] fails to build with
//! [`BuildError::SuggestionDomainTooLarge`].

use std::fmt;
use std::sync::Arc;

use super::{starts_with_ignore_case, ArgumentType, ArgumentValue, ParseError};
use crate::core::tokens::TokenStream;
use crate::engine::builder::{BuildError, BuildLimits};
use crate::engine::context::SuggestionContext;

/// Default message used when the predicate rejects a value.
pub const DEFAULT_PREDICATE_MESSAGE: &str = "Integer {value} is invalid";

type IntPredicate = Arc<dyn Fn(i64) -> bool + Send + Sync>;

/// Matches one token that parses as an integer within a range.
///
/// Bounds are inclusive and default to the full `i64` range. An optional
/// predicate narrows the accepted values further; its error template may
/// contain `{value}`, which is replaced with the rejected integer.
///
/// # Example
///
/// ```
/// use cmdtree::core::tokens::TokenStream;
/// use cmdtree::engine::arguments::{ArgumentType, ArgumentValue, IntegerArgument};
///
/// let even = IntegerArgument::new()
///     .range(0, 100)
///     .predicate_with_message(|v| v % 2 == 0, "{value} is not even");
///
/// let mut tokens = TokenStream::new(vec!["42".to_string()]);
/// assert_eq!(even.parse(&mut tokens).unwrap(), ArgumentValue::Integer(42));
///
/// let mut tokens = TokenStream::new(vec!["7".to_string()]);
/// assert_eq!(even.parse(&mut tokens).unwrap_err().message(), "7 is not even");
/// ```
#[derive(Clone)]
pub struct IntegerArgument {
    min: i64,
    max: i64,
    predicate: Option<IntPredicate>,
    error_template: String,
    suggest: bool,
}

impl IntegerArgument {
    /// An integer accepting any `i64`.
    pub fn new() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
            predicate: None,
            error_template: DEFAULT_PREDICATE_MESSAGE.to_string(),
            suggest: false,
        }
    }

    /// Set the inclusive minimum.
    pub fn min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    /// Set the inclusive maximum.
    pub fn max(mut self, max: i64) -> Self {
        self.max = max;
        self
    }

    /// Set both inclusive bounds.
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Reject values for which `predicate` returns false, using the
    /// default error template.
    pub fn predicate(mut self, predicate: impl Fn(i64) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Reject values for which `predicate` returns false with a custom
    /// error template (`{value}` is replaced by the integer).
    pub fn predicate_with_message(
        mut self,
        predicate: impl Fn(i64) -> bool + Send + Sync + 'static,
        error_template: impl Into<String>,
    ) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self.error_template = error_template.into();
        self
    }

    /// Suggest every accepted value in the range.
    pub fn auto_suggest(mut self) -> Self {
        self.suggest = true;
        self
    }

    /// Inclusive lower bound.
    pub fn min_value(&self) -> i64 {
        self.min
    }

    /// Inclusive upper bound.
    pub fn max_value(&self) -> i64 {
        self.max
    }

    /// Whether auto-suggestion is enabled.
    pub fn suggests(&self) -> bool {
        self.suggest
    }

    fn accepts(&self, value: i64) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(value))
    }

    fn check(&self, value: i64) -> Result<i64, ParseError> {
        if value < self.min {
            return Err(ParseError::new(format!(
                "Integer {} is less than the minimum value {}",
                value, self.min
            )));
        }

        if value > self.max {
            return Err(ParseError::new(format!(
                "Integer {} is greater than the maximum value {}",
                value, self.max
            )));
        }

        if !self.accepts(value) {
            return Err(ParseError::new(
                self.error_template.replace("{value}", &value.to_string()),
            ));
        }

        Ok(value)
    }

    /// Number of values in `[min, max]`, or 0 for an empty range.
    fn span(&self) -> u128 {
        if self.min > self.max {
            0
        } else {
            (i128::from(self.max) - i128::from(self.min) + 1) as u128
        }
    }
}

impl Default for IntegerArgument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IntegerArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerArgument")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("error_template", &self.error_template)
            .field("suggest", &self.suggest)
            .finish()
    }
}

impl ArgumentType for IntegerArgument {
    fn parse(&self, tokens: &mut TokenStream) -> Result<ArgumentValue, ParseError> {
        let token = tokens
            .peek()
            .ok_or_else(|| ParseError::new("Expected an integer"))?;

        let value = token
            .parse::<i64>()
            .map_err(|_| ParseError::new(format!("Invalid integer: {}", token)))?;

        let value = self.check(value)?;
        tokens.advance();
        Ok(ArgumentValue::Integer(value))
    }

    fn suggestions(&self, ctx: &mut SuggestionContext<'_>) {
        if !self.suggest || self.min > self.max {
            return;
        }

        let partial = ctx.partial().to_string();
        for value in self.min..=self.max {
            if !self.accepts(value) {
                continue;
            }
            let text = value.to_string();
            if starts_with_ignore_case(&text, &partial) {
                ctx.add_suggestion(text);
            }
        }
    }

    fn validate(&self, limits: &BuildLimits) -> Result<(), BuildError> {
        if self.min > self.max {
            return Err(BuildError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }

        if self.suggest && self.span() > limits.max_suggestions as u128 {
            return Err(BuildError::SuggestionDomainTooLarge {
                span: self.span(),
                limit: limits.max_suggestions,
            });
        }

        Ok(())
    }
}
