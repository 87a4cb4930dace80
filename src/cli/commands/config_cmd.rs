//! config command - Show the effective configuration

use std::process::ExitCode;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Keys `config get` understands, in listing order.
const KEYS: &[&str] = &[
    "engine.suggestion_limit",
    "console.name",
    "console.permissions",
    "console.commands_file",
];

#[derive(Debug, Serialize)]
struct Entry {
    key: String,
    value: String,
}

/// Resolve a key against the effective configuration.
fn value_of(ctx: &Context, key: &str) -> Option<String> {
    let value = match key {
        "engine.suggestion_limit" => ctx.build_limits().max_suggestions.to_string(),
        "console.name" => ctx.sender_name.clone(),
        "console.permissions" => ctx.permissions.iter().collect::<Vec<_>>().join(","),
        "console.commands_file" => ctx
            .commands_path()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        _ => return None,
    };
    Some(value)
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<ExitCode> {
    let Some(value) = value_of(ctx, key) else {
        bail!(
            "Unknown configuration key: {} (known keys: {})",
            key,
            KEYS.join(", ")
        );
    };

    if ctx.json {
        output::json(&Entry {
            key: key.to_string(),
            value,
        })?;
    } else if !value.is_empty() {
        println!("{}", value);
    }
    Ok(ExitCode::SUCCESS)
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<ExitCode> {
    let entries: Vec<Entry> = KEYS
        .iter()
        .filter_map(|key| {
            value_of(ctx, key).map(|value| Entry {
                key: key.to_string(),
                value,
            })
        })
        .collect();

    if ctx.json {
        output::json(&entries)?;
        return Ok(ExitCode::SUCCESS);
    }

    match ctx.config.global_config_loaded_from() {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Defaults (no config file)"),
    }
    for entry in &entries {
        if entry.value.is_empty() {
            println!("{} = (not set)", entry.key);
        } else {
            println!("{} = {}", entry.key, entry.value);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the path of the config file in use, or where one would be read from.
pub fn path(ctx: &Context) -> Result<ExitCode> {
    let path = match ctx.config.global_config_loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::global_config_path()?,
    };
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}
