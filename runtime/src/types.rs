//! Conversation data model shared by extraction and export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One role-tagged entry of a conversation. `content` is trimmed and
/// never empty when produced by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A complete export record.
///
/// Serialized as `{ "title", "url", "conversation" }` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationExport {
    /// Sanitized title, also used as the filename stem.
    pub title: String,
    /// Originating page address.
    #[serde(rename = "url")]
    pub source: String,
    #[serde(rename = "conversation")]
    pub messages: Vec<Message>,
}

impl ConversationExport {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            messages,
        }
    }
}
