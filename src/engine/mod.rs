//! engine
//!
//! Builds command trees, walks them, and reports how a walk ended.
//!
//! # Architecture
//!
//! The engine is layered leaf-first:
//!
//! 1. **Arguments**: each [`ArgumentType`] consumes tokens and offers completions
//! 2. **Tree**: [`ArgumentBuilder`] freezes into an immutable [`node::ArgumentNode`] graph
//! 3. **Contexts**: per-call state ([`ExecutionContext`], [`SuggestionContext`])
//! 4. **Dispatcher**: the requirement-gated, first-match tree walk
//! 5. **Commands**: [`CommandBuilder`] / [`Command`] wrap one tree under a name
//! 6. **Registry**: [`CommandRegistry`] resolves labels to commands
//!
//! # Command Lifecycle
//!
//! ```text
//! label lookup -> [Gate -> Select child]* -> Execute | Suggest
//!                        \-> Failure -> FailureHandler
//! ```
//!
//! # Invariants
//!
//! - A built tree is never mutated; every call gets a fresh context
//! - A failed parse leaves the token stream untouched
//! - The first child in declaration order that parses wins; there is no backtracking
//! - The failure handler runs at most once per call
//!
//! # Example
//!
//! ```
//! use cmdtree::engine::{
//!     argument, literal, BufferedSender, BuildLimits, CommandBuilder, CommandContext,
//!     CommandRegistry, IntegerArgument,
//! };
//!
//! let mut registry = CommandRegistry::new(BuildLimits::default());
//! CommandBuilder::new("page")
//!     .auto_failure_handler()
//!     .then(literal("help").executes(|ctx| ctx.reply("usage: page <n>")))
//!     .then(argument("n", IntegerArgument::new().range(1, 5)).executes(|ctx| {
//!         let n: i64 = ctx.arguments().get("n").unwrap_or(1);
//!         ctx.reply(format!("page {n}"));
//!     }))
//!     .register(&mut registry)
//!     .unwrap();
//!
//! let sender = BufferedSender::new("alice");
//! registry.dispatch_line("page 2", &sender).unwrap();
//! registry.dispatch_line("page 9", &sender).unwrap();
//! assert_eq!(
//!     sender.messages(),
//!     vec!["page 2", "Integer 9 is greater than the maximum value 5"]
//! );
//! ```

pub mod arguments;
pub mod builder;
pub mod command;
pub mod context;
pub mod declarative;
pub mod dispatcher;
pub mod failure;
pub mod node;
pub mod registry;
pub mod sender;

// Re-exports for convenience
pub use arguments::{
    ArgumentType, ArgumentValue, BooleanArgument, ChoiceArgument, FromArgument, IntegerArgument,
    LiteralArgument, ParseError, StringArgument, StringKind,
};
pub use builder::{
    argument, literal, literal_ignore_case, ArgumentBuilder, BuildError, BuildLimits,
    DEFAULT_MAX_SUGGESTIONS,
};
pub use command::{Command, CommandBuilder};
pub use context::{
    CommandContext, ExecutionContext, Mode, Outcome, ParsedArguments, SuggestionContext,
};
pub use failure::{auto_failure_handler, Failure, FailureHandler, FailureKind};
pub use node::{ArgumentNode, Requirement};
pub use registry::{CommandRegistry, RegistryError};
pub use sender::{BufferedSender, PermissionSet, Sender};
