//! Error types for the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Extraction produced no messages. Expected while a page is still
    /// loading; the caller surfaces a notice and produces no file.
    #[error("no conversation content found to export")]
    NoContentFound,

    /// A structural anchor the page should carry (title node, controls
    /// anchor) is absent.
    #[error("missing structural target: {0}")]
    MissingStructuralTarget(String),

    #[error("invalid selector for {name}: {selector:?} ({reason})")]
    InvalidSelector {
        name: &'static str,
        selector: String,
        reason: String,
    },

    #[error("page not ready after {attempts} attempt(s)")]
    NotReady { attempts: u32 },

    #[error("refusing to overwrite existing file: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
