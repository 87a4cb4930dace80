//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! cmdtree reads two kinds of file:
//! - **Global config**: engine limits and the console sender's identity
//! - **Command file**: declarative command trees (see [`commands`])
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$CMDTREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cmdtree/config.toml`
//! 3. `~/.cmdtree/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use cmdtree::core::config::Config;
//!
//! let result = Config::load().unwrap();
//! let config = result.config;
//!
//! println!("Suggestion limit: {:?}", config.suggestion_limit());
//! println!("Console name: {}", config.console_name());
//! ```

pub mod commands;
pub mod schema;

pub use commands::{ArgumentKind, CommandFile, CommandSpec, NodeShape, NodeSpec};
pub use schema::{ConsoleConfig, EngineConfig, GlobalConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "CMDTREE_CONFIG";

/// Name the console sender uses when none is configured.
pub const DEFAULT_CONSOLE_NAME: &str = "console";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Effective configuration.
///
/// Accessor methods fill in defaults for anything the file leaves out.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. A missing file is not an error (defaults are used).
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let (global, global_path) = Self::load_global(&mut warnings)?;
        global.validate()?;

        Ok(ConfigLoadResult {
            config: Config {
                global,
                global_path,
            },
            warnings,
        })
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let global = Self::read_global_config(path)?;
        global.validate()?;
        Ok(Config {
            global,
            global_path: Some(path.to_path_buf()),
        })
    }

    fn load_global(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $CMDTREE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_global_config(&path)?;
                return Ok((config, Some(path)));
            }
            warnings.push(ConfigWarning {
                message: format!("${} points to a missing file; ignoring it", CONFIG_ENV),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/cmdtree/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("cmdtree/config.toml");
            if path.exists() {
                let config = Self::read_global_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.cmdtree/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".cmdtree/config.toml");
            if path.exists() {
                let config = Self::read_global_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn read_global_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.cmdtree/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cmdtree/config.toml"))
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Largest integer range an argument may auto-suggest.
    ///
    /// `None` leaves the engine's default in place.
    pub fn suggestion_limit(&self) -> Option<usize> {
        self.global.engine.as_ref().and_then(|e| e.suggestion_limit)
    }

    /// Display name of the console sender.
    ///
    /// Defaults to `"console"`.
    pub fn console_name(&self) -> &str {
        self.global
            .console
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or(DEFAULT_CONSOLE_NAME)
    }

    /// Permissions granted to the console sender.
    ///
    /// Defaults to none.
    pub fn console_permissions(&self) -> &[String] {
        self.global
            .console
            .as_ref()
            .and_then(|c| c.permissions.as_deref())
            .unwrap_or(&[])
    }

    /// The configured command file, resolved against the config file's
    /// directory when relative.
    pub fn commands_file(&self) -> Option<PathBuf> {
        let file = self.global.console.as_ref()?.commands_file.as_ref()?;
        if file.is_absolute() {
            return Some(file.clone());
        }
        let base = self.global_path.as_deref().and_then(Path::parent);
        Some(base.map_or_else(|| file.clone(), |dir| dir.join(file)))
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }
}
