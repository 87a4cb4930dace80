//! ui::console
//!
//! The terminal-backed sender the binary dispatches as.

use crate::engine::sender::{PermissionSet, Sender};

use super::output::{self, Verbosity};

/// A sender that prints every message it receives to stdout.
///
/// Quiet mode silences messages; permissions come from config and flags.
#[derive(Debug, Clone)]
pub struct ConsoleSender {
    name: String,
    permissions: PermissionSet,
    verbosity: Verbosity,
}

impl ConsoleSender {
    /// Create a console sender.
    pub fn new(name: impl Into<String>, permissions: PermissionSet, verbosity: Verbosity) -> Self {
        Self {
            name: name.into(),
            permissions,
            verbosity,
        }
    }

    /// Granted permissions.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }
}

impl Sender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        output::print(message, self.verbosity);
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.allows(permission)
    }
}
