//! Conversation title, sanitized for use as a filename stem.

use crate::page::{text_content, Page};
use crate::selectors::CompiledSelectors;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Title used when the page carries no title node.
pub const DEFAULT_TITLE: &str = "gemini_conversation";

/// Longest sanitized title, in characters.
pub const MAX_TITLE_CHARS: usize = 150;

static UNSAFE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s\\/:*?"<>|]+"#).unwrap());

/// Read the page title and sanitize it.
///
/// Falls back to [`DEFAULT_TITLE`] when the title node is missing or has no
/// text. The result is the same on every call for an unchanged page.
pub fn derive_title(page: &Page, selectors: &CompiledSelectors) -> String {
    let raw = match page.select_first(&selectors.title) {
        Some(node) => text_content(node).trim().to_string(),
        None => {
            warn!("title node not found, using default title");
            String::new()
        }
    };

    if raw.is_empty() {
        return sanitize_title(DEFAULT_TITLE);
    }
    sanitize_title(&raw)
}

/// Replace each run of whitespace or `\ / : * ? " < > |` with a single `_`,
/// then cap the length at [`MAX_TITLE_CHARS`].
pub fn sanitize_title(title: &str) -> String {
    UNSAFE_RUN_RE
        .replace_all(title, "_")
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}
