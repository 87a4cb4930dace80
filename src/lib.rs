//! cmdtree - Command argument trees for line-based commands
//!
//! cmdtree builds immutable grammar trees out of literal and typed tokens,
//! dispatches raw command lines against them, and enumerates completions for
//! partially typed input. A single tree serves both traversals and may be
//! shared by any number of concurrent invocations.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`core`] - Strong types, token streams, and configuration
//! - [`engine`] - Argument types, tree, contexts, dispatcher, commands, registry
//! - [`cli`] - Command-line front-end (parses args, delegates to engine)
//! - [`ui`] - Console output and the terminal-backed sender
//!
//! # Correctness Invariants
//!
//! 1. A registered tree is never mutated; all per-call state lives in a context
//! 2. A failed argument parse never consumes tokens
//! 3. The first matching child in declaration order always wins
//! 4. The failure handler runs at most once per invocation
//!
//! # Example
//!
//! ```
//! use cmdtree::engine::{
//!     argument, literal, BufferedSender, CommandBuilder, CommandContext, IntegerArgument,
//! };
//!
//! let command = CommandBuilder::new("tp")
//!     .then(literal("here").executes(|ctx| ctx.reply("teleported here")))
//!     .then(
//!         argument("x", IntegerArgument::new().min(0)).then(
//!             argument("y", IntegerArgument::new().min(0)).executes(|ctx| {
//!                 let x: i64 = ctx.arguments().get("x").unwrap_or_default();
//!                 let y: i64 = ctx.arguments().get("y").unwrap_or_default();
//!                 ctx.reply(format!("teleported to {x} {y}"));
//!             }),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let sender = BufferedSender::new("alice");
//! let outcome = command.on_command(&sender, "tp", &["3".to_string(), "4".to_string()]);
//! assert!(outcome.is_success());
//! assert_eq!(sender.messages(), vec!["teleported to 3 4".to_string()]);
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
