//! Structured JSON record.

use crate::types::Message;
use serde::Serialize;

/// Borrowed view with the same wire shape as [`ConversationExport`].
#[derive(Serialize)]
struct ExportRecord<'a> {
    title: &'a str,
    url: &'a str,
    conversation: &'a [Message],
}

/// Render `{ "title", "url", "conversation" }` with two-space indentation.
pub fn to_json(title: &str, source: &str, messages: &[Message]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportRecord {
        title,
        url: source,
        conversation: messages,
    })
}
