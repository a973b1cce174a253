//! Message types for prompts.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single prompt message.
///
/// # Examples
///
/// ```
/// use scriptura_core::{Message, Role};
///
/// let message = Message::user("Describe the tavern.");
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Describe the tavern.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
