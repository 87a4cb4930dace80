//! engine::declarative
//!
//! Command trees built from a [`CommandFile`] instead of code.
//!
//! Each declared node becomes one [`ArgumentBuilder`]; a `reply` becomes an
//! executor that renders the template and sends it back to the sender.
//! Templates expand `{sender}`, `{label}`, and `{name}` for every value
//! captured along the matched path. Unknown placeholders are left as-is.

use thiserror::Error;

use super::arguments::{BooleanArgument, ChoiceArgument, IntegerArgument, StringArgument};
use super::builder::{argument, literal, literal_ignore_case, ArgumentBuilder};
use super::command::CommandBuilder;
use super::context::CommandContext;
use super::node::Requirement;
use super::registry::{CommandRegistry, RegistryError};
use crate::core::config::{
    ArgumentKind, CommandFile, CommandSpec, ConfigError, NodeShape, NodeSpec,
};

/// Errors from turning a command file into registered commands.
#[derive(Debug, Error)]
pub enum DeclarativeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("command '{command}': {source}")]
    Registry {
        command: String,
        #[source]
        source: RegistryError,
    },
}

/// Build and register every command in `file`.
///
/// Stops at the first command that fails; commands before it stay registered.
/// Returns the number of commands registered.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use cmdtree::core::config::CommandFile;
/// use cmdtree::engine::declarative::register_file;
/// use cmdtree::engine::{BufferedSender, BuildLimits, CommandRegistry};
///
/// let file = CommandFile::parse(
///     r#"
///     [[command]]
///     name = "greet"
///     [[command.node]]
///     argument = "who"
///     type = "word"
///     reply = "Hello, {who}! (from {sender})"
///     "#,
///     Path::new("inline.toml"),
/// )
/// .unwrap();
///
/// let mut registry = CommandRegistry::new(BuildLimits::default());
/// assert_eq!(register_file(&file, &mut registry).unwrap(), 1);
///
/// let sender = BufferedSender::new("alice");
/// registry.dispatch_line("greet bob", &sender).unwrap();
/// assert_eq!(sender.messages(), vec!["Hello, bob! (from alice)"]);
/// ```
pub fn register_file(
    file: &CommandFile,
    registry: &mut CommandRegistry,
) -> Result<usize, DeclarativeError> {
    for spec in &file.commands {
        command_builder(spec)?
            .register(registry)
            .map_err(|source| DeclarativeError::Registry {
                command: spec.name.clone(),
                source,
            })?;
    }
    Ok(file.commands.len())
}

/// Translate one declared command into a builder.
pub fn command_builder(spec: &CommandSpec) -> Result<CommandBuilder, ConfigError> {
    let mut builder =
        CommandBuilder::new(spec.name.as_str()).aliases(spec.aliases.iter().cloned());

    if let Some(description) = &spec.description {
        builder = builder.description(description.as_str());
    }
    if spec.auto_fail {
        builder = builder.auto_failure_handler();
    }
    if let Some(requirement) =
        permission_requirement(spec.permission.as_deref(), spec.permission_message.as_deref())
    {
        builder = builder.requirement(requirement);
    }
    if let Some(template) = spec.reply.clone() {
        builder = builder.executes(move |ctx| ctx.reply(render(&template, &*ctx)));
    }
    for node in &spec.nodes {
        builder = builder.then(node_builder(node)?);
    }
    Ok(builder)
}

fn node_builder(spec: &NodeSpec) -> Result<ArgumentBuilder, ConfigError> {
    let mut builder = match spec.shape()? {
        NodeShape::Literal(text) if spec.ignore_case => literal_ignore_case(text),
        NodeShape::Literal(text) => literal(text),
        NodeShape::Argument { name, kind } => match kind {
            ArgumentKind::Integer => {
                let mut integer = IntegerArgument::new();
                if let Some(min) = spec.min {
                    integer = integer.min(min);
                }
                if let Some(max) = spec.max {
                    integer = integer.max(max);
                }
                if spec.suggest {
                    integer = integer.auto_suggest();
                }
                argument(name, integer)
            }
            ArgumentKind::Boolean => argument(name, BooleanArgument::new()),
            ArgumentKind::Word => argument(name, StringArgument::word()),
            ArgumentKind::String => argument(name, StringArgument::quoted()),
            ArgumentKind::Greedy => argument(name, StringArgument::greedy()),
            ArgumentKind::Choice => argument(
                name,
                ChoiceArgument::new(spec.choices.iter().flatten().cloned()),
            ),
        },
    };

    if let Some(requirement) =
        permission_requirement(spec.permission.as_deref(), spec.permission_message.as_deref())
    {
        builder = builder.requirement(requirement);
    }
    if let Some(template) = spec.reply.clone() {
        builder = builder.executes(move |ctx| ctx.reply(render(&template, &*ctx)));
    }
    for child in &spec.children {
        builder = builder.then(node_builder(child)?);
    }
    Ok(builder)
}

fn permission_requirement(permission: Option<&str>, message: Option<&str>) -> Option<Requirement> {
    let permission = permission?.to_string();
    let check = move |ctx: &dyn CommandContext| ctx.sender().has_permission(&permission);
    Some(match message {
        Some(message) => Requirement::new(message, check),
        None => Requirement::silent(check),
    })
}

/// Expand `{sender}`, `{label}`, and captured argument placeholders.
///
/// The template is scanned once; substituted values are never rescanned.
/// When a name was captured twice, the later value wins.
pub fn render(template: &str, ctx: &dyn CommandContext) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(|c: char| c == '{' || c == '}') {
            Some(close) if after[close..].starts_with('}') => {
                let key = &after[..close];
                match placeholder(key, ctx) {
                    Some(value) => rendered.push_str(&value),
                    None => {
                        rendered.push('{');
                        rendered.push_str(key);
                        rendered.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                rendered.push('{');
                rest = after;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

fn placeholder(key: &str, ctx: &dyn CommandContext) -> Option<String> {
    match key {
        "sender" => Some(ctx.sender().name().to_string()),
        "label" => Some(ctx.label().to_string()),
        _ => ctx.arguments().value(key).map(ToString::to_string),
    }
}
