//! engine::sender
//!
//! The identity a command runs on behalf of.
//!
//! # Architecture
//!
//! The engine treats a sender as an opaque capability: it hands the sender
//! to requirement predicates and executors, and the failure handler may
//! send it a message. It never inspects anything else.
//!
//! Implementations must be `Send + Sync`: one sender may be dispatching
//! a command while a completion request for it runs on another thread.

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

/// Permission that grants every other permission.
pub const WILDCARD_PERMISSION: &str = "*";

/// A principal that can invoke commands and receive feedback.
pub trait Sender: Send + Sync {
    /// Display name of the sender.
    fn name(&self) -> &str;

    /// Deliver a line of feedback to the sender.
    fn send_message(&self, message: &str);

    /// Whether the sender holds `permission`.
    ///
    /// Senders hold no permissions unless they say otherwise.
    fn has_permission(&self, _permission: &str) -> bool {
        false
    }
}

/// A set of granted permissions with wildcard support.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    granted: BTreeSet<String>,
}

impl PermissionSet {
    /// Create a permission set from granted names.
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    /// Grant an additional permission.
    pub fn grant(&mut self, permission: impl Into<String>) {
        self.granted.insert(permission.into());
    }

    /// Whether `permission` is granted directly or through the wildcard.
    pub fn allows(&self, permission: &str) -> bool {
        self.granted.contains(WILDCARD_PERMISSION) || self.granted.contains(permission)
    }

    /// Iterate over granted permissions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.granted.iter().map(String::as_str)
    }
}

/// A sender that records every message it receives.
///
/// Used for machine-readable output and in tests.
///
/// # Example
///
/// ```
/// use cmdtree::engine::sender::{BufferedSender, Sender};
///
/// let sender = BufferedSender::new("alice").with_permissions(["tp.use"]);
/// sender.send_message("hello");
/// assert!(sender.has_permission("tp.use"));
/// assert_eq!(sender.messages(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct BufferedSender {
    name: String,
    permissions: PermissionSet,
    messages: Mutex<Vec<String>>,
}

impl BufferedSender {
    /// Create a sender with no permissions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: PermissionSet::default(),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Grant permissions to this sender.
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for permission in permissions {
            self.permissions.grant(permission);
        }
        self
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all messages received so far.
    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Sender for BufferedSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.allows(permission)
    }
}
