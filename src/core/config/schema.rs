//! core::config::schema
//!
//! Global configuration schema.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$CMDTREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cmdtree/config.toml`
//! 3. `~/.cmdtree/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing (e.g., the suggestion limit must be
//! at least one, permission names must be non-empty).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [engine]
/// suggestion_limit = 256
///
/// [console]
/// name = "operator"
/// permissions = ["tp.use", "spawn.*"]
/// commands_file = "commands.toml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Engine settings
    pub engine: Option<EngineConfig>,

    /// Settings for the terminal sender
    pub console: Option<ConsoleConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(engine) = &self.engine {
            engine.validate()?;
        }
        if let Some(console) = &self.console {
            console.validate()?;
        }
        Ok(())
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Largest integer range an argument may auto-suggest
    pub suggestion_limit: Option<usize>,
}

impl EngineConfig {
    /// Validate the engine settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_limit == Some(0) {
            return Err(ConfigError::InvalidValue(
                "engine.suggestion_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the sender the binary dispatches as.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Display name
    pub name: Option<String>,

    /// Granted permissions (`*` grants all)
    pub permissions: Option<Vec<String>>,

    /// Command file loaded when `--commands` is not given.
    /// Relative paths are resolved against the config file's directory.
    pub commands_file: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Validate the console settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "console.name cannot be empty".to_string(),
                ));
            }
        }

        if let Some(permissions) = &self.permissions {
            if let Some(bad) = permissions
                .iter()
                .find(|p| p.is_empty() || p.chars().any(char::is_whitespace))
            {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid console permission '{}'",
                    bad
                )));
            }
        }

        Ok(())
    }
}
