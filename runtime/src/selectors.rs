//! Structural selectors for the shared-conversation page.
//!
//! Selectors are data, not logic: the extractor only ever sees a
//! [`CompiledSelectors`], so a markup change on the page is handled by
//! editing a JSON file rather than the extraction code.

use crate::error::{ExportError, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Raw selector strings. Every field falls back to the Gemini share-page
/// markup when omitted from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container for each user/assistant turn.
    pub turn_container: String,
    /// User prompt text within a turn.
    pub user_query: String,
    /// Assistant response within a turn.
    pub assistant_response: String,
    /// Element the export controls are attached after.
    pub controls_anchor: String,
    /// Conversation title.
    pub title: String,
    /// `id` of the export controls container, used to detect an existing install.
    pub controls_id: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            turn_container: "share-turn-viewer".into(),
            user_query: ".query-text".into(),
            assistant_response: "message-content".into(),
            controls_anchor: ".share-title-section".into(),
            title: "h1.share-title".into(),
            controls_id: "gemini-exporter-buttons".into(),
        }
    }
}

impl SelectorConfig {
    /// Load a selector set from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        debug!("loaded selectors from {}", path.display());
        Ok(config)
    }

    /// Parse every selector, failing on the first one that does not parse.
    pub fn compile(&self) -> Result<CompiledSelectors> {
        if self.controls_id.is_empty() || self.controls_id.contains('"') {
            return Err(ExportError::InvalidSelector {
                name: "controls_id",
                selector: self.controls_id.clone(),
                reason: "id must be non-empty and contain no quotes".into(),
            });
        }

        Ok(CompiledSelectors {
            turn: parse("turn_container", &self.turn_container)?,
            user: parse("user_query", &self.user_query)?,
            assistant: parse("assistant_response", &self.assistant_response)?,
            controls_anchor: parse("controls_anchor", &self.controls_anchor)?,
            title: parse("title", &self.title)?,
            controls: parse("controls_id", &format!("[id=\"{}\"]", self.controls_id))?,
        })
    }
}

fn parse(name: &'static str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExportError::InvalidSelector {
        name,
        selector: selector.to_string(),
        reason: format!("{e:?}"),
    })
}

/// Parsed selectors, ready for querying a page.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub turn: Selector,
    pub user: Selector,
    pub assistant: Selector,
    pub controls_anchor: Selector,
    pub title: Selector,
    pub controls: Selector,
}
