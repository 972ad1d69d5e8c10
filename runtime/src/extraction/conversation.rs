//! Turn-by-turn message extraction.

use crate::page::{rendered_text, select_within, Page};
use crate::selectors::CompiledSelectors;
use crate::types::{Message, Role};
use scraper::{ElementRef, Selector};
use tracing::{debug, info};

/// Extract the conversation from `page`, in document order.
///
/// Each turn contributes its first user node and its first assistant node,
/// user first, when their rendered text is non-empty after trimming. Missing
/// or empty nodes contribute nothing. An empty result means "nothing to
/// export" and is left for the caller to report.
pub fn extract(page: &Page, selectors: &CompiledSelectors) -> Vec<Message> {
    let mut messages = Vec::new();

    for (index, turn) in page.select_all(&selectors.turn).enumerate() {
        for (role, selector) in [
            (Role::User, &selectors.user),
            (Role::Assistant, &selectors.assistant),
        ] {
            match read_slot(turn, selector) {
                Some(content) => messages.push(Message { role, content }),
                None => debug!("turn {index}: no {role} text"),
            }
        }
    }

    info!("extracted {} messages", messages.len());
    messages
}

fn read_slot(turn: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let node = select_within(turn, selector)?;
    let text = rendered_text(node);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
