//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`console`] - The terminal-backed command sender
//!
//! # Design
//!
//! All user-facing output goes through this module so that quiet and JSON
//! modes are honoured in one place. The engine never depends on it.

pub mod console;
pub mod output;
