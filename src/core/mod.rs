//! core
//!
//! Core types, token streams, and configuration for cmdtree.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommandName
//! - [`tokens`] - Token sequences consumed by the dispatcher
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at construction time
//! - Schemas are strict and self-describing
//! - Token consumption is front-to-back and never reorders input

pub mod config;
pub mod tokens;
pub mod types;
