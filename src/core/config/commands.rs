//! core::config::commands
//!
//! Command file schema: command trees declared in TOML.
//!
//! # Format
//!
//! ```toml
//! [[command]]
//! name = "tp"
//! aliases = ["teleport"]
//! permission = "tp.use"
//! permission_message = "You may not teleport"
//!
//! [[command.node]]
//! literal = "here"
//! reply = "Teleported {sender} here"
//!
//! [[command.node]]
//! argument = "x"
//! type = "integer"
//! min = 0
//!
//!   [[command.node.node]]
//!   argument = "y"
//!   type = "integer"
//!   min = 0
//!   reply = "Teleported to {x} {y}"
//! ```
//!
//! Nodes are listed in match order. A node is either a `literal` or an
//! `argument` with a `type`; the remaining keys refine it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::CommandName;

/// A parsed command file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommandFile {
    /// Declared commands, in file order
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandSpec>,
}

/// One declared command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Primary name
    pub name: String,

    /// Alternative labels
    #[serde(default)]
    pub aliases: Vec<String>,

    /// One-line description
    pub description: Option<String>,

    /// Permission required to use the command at all
    pub permission: Option<String>,

    /// Message shown when `permission` is missing; absent hides the command
    pub permission_message: Option<String>,

    /// Forward failure messages to the sender (default true)
    #[serde(default = "default_true")]
    pub auto_fail: bool,

    /// Reply when the command is run without arguments
    pub reply: Option<String>,

    /// Children of the root, in match order
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

fn default_true() -> bool {
    true
}

/// Argument types a node may declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    /// A whole number, optionally bounded by `min` / `max`
    Integer,
    /// `true` or `false`
    Boolean,
    /// A single token
    Word,
    /// A single token or a double-quoted phrase
    String,
    /// Every remaining token
    Greedy,
    /// One of `choices`
    Choice,
}

impl ArgumentKind {
    fn as_str(self) -> &'static str {
        match self {
            ArgumentKind::Integer => "integer",
            ArgumentKind::Boolean => "boolean",
            ArgumentKind::Word => "word",
            ArgumentKind::String => "string",
            ArgumentKind::Greedy => "greedy",
            ArgumentKind::Choice => "choice",
        }
    }
}

/// The shape of a node once its keys are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape<'a> {
    /// Fixed text
    Literal(&'a str),
    /// A typed value captured under a name
    Argument { name: &'a str, kind: ArgumentKind },
}

/// One declared node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Fixed text to match
    pub literal: Option<String>,

    /// Name a typed value is captured under
    pub argument: Option<String>,

    /// Type of `argument`
    #[serde(rename = "type")]
    pub kind: Option<ArgumentKind>,

    /// Lower bound (integer)
    pub min: Option<i64>,

    /// Upper bound (integer)
    pub max: Option<i64>,

    /// Offer every value in `min..=max` as a completion (integer)
    #[serde(default)]
    pub suggest: bool,

    /// Allowed values (choice)
    pub choices: Option<Vec<String>>,

    /// Match the literal regardless of case
    #[serde(default)]
    pub ignore_case: bool,

    /// Permission required to pass this node
    pub permission: Option<String>,

    /// Message shown when `permission` is missing; absent hides the node
    pub permission_message: Option<String>,

    /// Reply when a command line ends here; `{name}` expands captured values
    pub reply: Option<String>,

    /// Children, in match order
    #[serde(default, rename = "node")]
    pub children: Vec<NodeSpec>,
}

impl CommandFile {
    /// Read, parse, and validate a command file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate command file contents. `path` is used in errors.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: CommandFile = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Validate every command and node.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }
}

impl CommandSpec {
    /// Validate the command's labels, permission, and nodes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for label in std::iter::once(&self.name).chain(&self.aliases) {
            CommandName::new(label.as_str()).map_err(|e| {
                ConfigError::InvalidValue(format!("command '{}': {}", self.name, e))
            })?;
        }

        check_permission(
            &self.name,
            self.permission.as_deref(),
            self.permission_message.as_deref(),
        )?;

        for node in &self.nodes {
            node.validate(&self.name)?;
        }
        Ok(())
    }
}

impl NodeSpec {
    /// Classify the node.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one of `literal` or `argument` is set, and an
    /// argument has a `type`.
    pub fn shape(&self) -> Result<NodeShape<'_>, ConfigError> {
        self.classify().map_err(ConfigError::InvalidValue)
    }

    fn classify(&self) -> Result<NodeShape<'_>, String> {
        match (&self.literal, &self.argument, self.kind) {
            (Some(text), None, None) => Ok(NodeShape::Literal(text)),
            (None, Some(name), Some(kind)) => Ok(NodeShape::Argument { name, kind }),
            (None, Some(name), None) => Err(format!("argument '{}' needs a type", name)),
            (Some(text), None, Some(_)) => Err(format!("literal '{}' cannot have a type", text)),
            (Some(_), Some(_), _) => {
                Err("a node cannot be both a literal and an argument".to_string())
            }
            (None, None, _) => Err("a node needs either 'literal' or 'argument'".to_string()),
        }
    }

    fn validate(&self, command: &str) -> Result<(), ConfigError> {
        let invalid =
            |message: String| ConfigError::InvalidValue(format!("command '{}': {}", command, message));

        let shape = self.classify().map_err(invalid)?;

        match shape {
            NodeShape::Literal(text) => {
                if text.is_empty() || text.chars().any(char::is_whitespace) {
                    return Err(invalid(format!("invalid literal '{}'", text)));
                }
                self.reject_argument_keys(text, &invalid)?;
            }
            NodeShape::Argument { name, kind } => {
                if name.is_empty() {
                    return Err(invalid("argument name cannot be empty".to_string()));
                }
                if self.ignore_case {
                    return Err(invalid(format!(
                        "'ignore_case' only applies to literals, not '{}'",
                        name
                    )));
                }
                let integer_only = self.min.is_some() || self.max.is_some() || self.suggest;
                if integer_only && kind != ArgumentKind::Integer {
                    return Err(invalid(format!(
                        "'min', 'max' and 'suggest' only apply to integers, not {} '{}'",
                        kind.as_str(),
                        name
                    )));
                }
                if self.suggest && (self.min.is_none() || self.max.is_none()) {
                    return Err(invalid(format!(
                        "integer '{}' needs both 'min' and 'max' to suggest values",
                        name
                    )));
                }
                match (kind, &self.choices) {
                    (ArgumentKind::Choice, Some(choices)) if !choices.is_empty() => {}
                    (ArgumentKind::Choice, _) => {
                        return Err(invalid(format!("choice '{}' needs at least one choice", name)));
                    }
                    (_, Some(_)) => {
                        return Err(invalid(format!(
                            "'choices' only apply to choice arguments, not '{}'",
                            name
                        )));
                    }
                    (_, None) => {}
                }
            }
        }

        check_permission(
            command,
            self.permission.as_deref(),
            self.permission_message.as_deref(),
        )?;

        for child in &self.children {
            child.validate(command)?;
        }
        Ok(())
    }

    fn reject_argument_keys(
        &self,
        text: &str,
        invalid: &impl Fn(String) -> ConfigError,
    ) -> Result<(), ConfigError> {
        if self.min.is_some() || self.max.is_some() || self.suggest || self.choices.is_some() {
            return Err(invalid(format!(
                "literal '{}' cannot have 'min', 'max', 'suggest' or 'choices'",
                text
            )));
        }
        Ok(())
    }
}

fn check_permission(
    command: &str,
    permission: Option<&str>,
    message: Option<&str>,
) -> Result<(), ConfigError> {
    match (permission, message) {
        (Some(p), _) if p.is_empty() || p.chars().any(char::is_whitespace) => Err(
            ConfigError::InvalidValue(format!("command '{}': invalid permission '{}'", command, p)),
        ),
        (None, Some(_)) => Err(ConfigError::InvalidValue(format!(
            "command '{}': 'permission_message' without 'permission'",
            command
        ))),
        _ => Ok(()),
    }
}
