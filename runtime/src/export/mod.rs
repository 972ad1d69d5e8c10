//! Serializing a conversation and handing the result to a sink.

pub mod artifact;
pub mod json;
pub mod sink;
pub mod text;

pub use artifact::{ExportArtifact, ExportFormat};
pub use json::to_json;
pub use sink::{DirectorySink, SaveSink, SavedArtifact, StdoutSink};
pub use text::to_text;
