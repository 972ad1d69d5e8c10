//! Export shared Gemini conversations from rendered page snapshots.
//!
//! The core is pure: [`extraction`] reads role-tagged messages and a
//! sanitized title out of a [`page::Page`], [`export`] serializes them as a
//! flat transcript or a JSON record, and [`pipeline::Exporter`] ties one
//! request together and hands the artifact to a [`export::SaveSink`].

pub mod cli;
pub mod controls;
pub mod error;
pub mod export;
pub mod extraction;
pub mod page;
pub mod pipeline;
pub mod readiness;
pub mod selectors;
pub mod types;

pub use error::{ExportError, Result};
pub use export::{ExportArtifact, ExportFormat};
pub use page::Page;
pub use pipeline::Exporter;
pub use selectors::{CompiledSelectors, SelectorConfig};
pub use types::{ConversationExport, Message, Role};
