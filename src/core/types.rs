//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommandName`] - Validated command label (primary name or alias)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the registry never has to re-check a label.
//!
//! # Examples
//!
//! ```
//! use cmdtree::core::types::CommandName;
//!
//! let name = CommandName::new("Teleport").unwrap();
//! assert_eq!(name.as_str(), "teleport");
//!
//! assert!(CommandName::new("").is_err());
//! assert!(CommandName::new("tp; rm").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum allowed length for a command name.
pub const MAX_COMMAND_NAME_LEN: usize = 64;

/// Characters that are never part of a command label.
const FORBIDDEN_CHARS: &[char] = &[
    ';', '|', '&', '`', '$', '(', ')', '{', '}', '<', '>', '\\', '\'', '"',
];

/// Errors from type validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),
}

/// A validated command label.
///
/// Labels are normalized to lowercase because command lookup is
/// case-insensitive. A label:
/// - Cannot be empty or longer than [`MAX_COMMAND_NAME_LEN`]
/// - Cannot contain whitespace or control characters
/// - Cannot contain shell metacharacters (`;`, `|`, `&`, `$`, quotes, ...)
///
/// # Example
///
/// ```
/// use cmdtree::core::types::CommandName;
///
/// let name = CommandName::new("spawn-mob").unwrap();
/// assert_eq!(name.to_string(), "spawn-mob");
///
/// assert!(CommandName::new("two words").is_err());
/// assert!(CommandName::new("a".repeat(65)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandName(String);

impl CommandName {
    /// Create a new validated command name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommandName` if the label is empty, too long,
    /// or contains whitespace, control characters, or metacharacters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into().to_lowercase();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidCommandName(
                "command name cannot be empty".into(),
            ));
        }

        if name.chars().count() > MAX_COMMAND_NAME_LEN {
            return Err(TypeError::InvalidCommandName(format!(
                "command name exceeds maximum length of {MAX_COMMAND_NAME_LEN}"
            )));
        }

        for c in name.chars() {
            if c.is_whitespace() {
                return Err(TypeError::InvalidCommandName(
                    "command name cannot contain whitespace".into(),
                ));
            }
            if c.is_control() {
                return Err(TypeError::InvalidCommandName(
                    "command name cannot contain control characters".into(),
                ));
            }
            if FORBIDDEN_CHARS.contains(&c) {
                return Err(TypeError::InvalidCommandName(format!(
                    "command name cannot contain '{c}'"
                )));
            }
        }

        Ok(())
    }

    /// Get the command name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommandName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommandName> for String {
    fn from(name: CommandName) -> Self {
        name.0
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
