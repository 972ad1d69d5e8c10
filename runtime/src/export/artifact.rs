//! Export formats and the artifacts they produce.

use crate::error::Result;
use crate::types::ConversationExport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output encoding selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Text, ExportFormat::Json];

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    /// Serialize `export` in this format.
    pub fn render(&self, export: &ConversationExport) -> Result<String> {
        Ok(match self {
            ExportFormat::Text => super::to_text(&export.title, &export.source, &export.messages),
            ExportFormat::Json => super::to_json(&export.title, &export.source, &export.messages)?,
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Bytes ready for the save collaborator, with their suggested filename
/// and MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: &'static str,
}

impl ExportArtifact {
    /// Serialize `export` and pair it with `<title>.<ext>` and the format's MIME type.
    pub fn build(export: &ConversationExport, format: ExportFormat) -> Result<Self> {
        let body = format.render(export)?;
        Ok(Self {
            bytes: body.into_bytes(),
            filename: format!("{}.{}", export.title, format.extension()),
            mime: format.mime(),
        })
    }
}
