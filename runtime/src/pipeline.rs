//! One export request: extract, title, serialize, save.
//!
//! Every run recomputes from the current page, so two runs over the same
//! page are independent and produce the same artifact.

use crate::error::{ExportError, Result};
use crate::export::{ExportArtifact, ExportFormat, SaveSink, SavedArtifact};
use crate::extraction::{derive_title, extract};
use crate::page::Page;
use crate::selectors::CompiledSelectors;
use crate::types::ConversationExport;
use tracing::info;

/// Runs export requests against pages using a fixed selector set.
pub struct Exporter {
    selectors: CompiledSelectors,
    source: String,
}

impl Exporter {
    /// `source` is recorded in every export as the page address.
    pub fn new(selectors: CompiledSelectors, source: impl Into<String>) -> Self {
        Self {
            selectors,
            source: source.into(),
        }
    }

    /// Build the export record, or [`ExportError::NoContentFound`] when the
    /// page yields no messages.
    pub fn collect(&self, page: &Page) -> Result<ConversationExport> {
        let messages = extract(page, &self.selectors);
        if messages.is_empty() {
            info!("no conversation content found to export");
            return Err(ExportError::NoContentFound);
        }
        let title = derive_title(page, &self.selectors);
        Ok(ConversationExport::new(title, self.source.clone(), messages))
    }

    /// Build the artifact for one format without saving it.
    pub fn artifact(&self, page: &Page, format: ExportFormat) -> Result<ExportArtifact> {
        let export = self.collect(page)?;
        ExportArtifact::build(&export, format)
    }

    /// Run one full export and hand the artifact to `sink`. Nothing reaches
    /// the sink when the page has no content.
    pub fn run(
        &self,
        page: &Page,
        format: ExportFormat,
        sink: &mut dyn SaveSink,
    ) -> Result<SavedArtifact> {
        let artifact = self.artifact(page, format)?;
        sink.prepare(std::slice::from_ref(&artifact))?;
        save(&artifact, sink)
    }

    /// Run one independent export per format. Every artifact is built and
    /// checked against the sink before the first one is saved, so a refused
    /// target leaves no partial output.
    pub fn run_many(
        &self,
        page: &Page,
        formats: &[ExportFormat],
        sink: &mut dyn SaveSink,
    ) -> Result<Vec<SavedArtifact>> {
        let artifacts = formats
            .iter()
            .map(|format| self.artifact(page, *format))
            .collect::<Result<Vec<_>>>()?;
        sink.prepare(&artifacts)?;
        artifacts
            .iter()
            .map(|artifact| save(artifact, &mut *sink))
            .collect()
    }
}

fn save(artifact: &ExportArtifact, sink: &mut dyn SaveSink) -> Result<SavedArtifact> {
    let saved = sink.save(artifact)?;
    info!(
        "exported {} as {} ({} bytes)",
        saved.filename, saved.mime, saved.bytes
    );
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;

    const PAGE: &str = r#"<html><body>
        <div class="share-title-section"><h1 class="share-title">Test: chat</h1></div>
        <share-turn-viewer>
          <div class="query-text">Hi</div>
          <message-content>Hello</message-content>
        </share-turn-viewer>
    </body></html>"#;

    /// Counts saves without persisting anything.
    #[derive(Default)]
    struct RecordingSink {
        saved: Vec<ExportArtifact>,
    }

    impl SaveSink for RecordingSink {
        fn save(&mut self, artifact: &ExportArtifact) -> Result<SavedArtifact> {
            self.saved.push(artifact.clone());
            Ok(SavedArtifact {
                filename: artifact.filename.clone(),
                mime: artifact.mime.to_string(),
                bytes: artifact.bytes.len(),
                location: None,
            })
        }
    }

    fn exporter() -> Exporter {
        Exporter::new(SelectorConfig::default().compile().unwrap(), "http://x")
    }

    #[test]
    fn test_collect() {
        let export = exporter().collect(&Page::parse(PAGE)).unwrap();
        assert_eq!(export.title, "Test_chat");
        assert_eq!(export.source, "http://x");
        assert_eq!(export.messages.len(), 2);
    }

    #[test]
    fn test_run_text() {
        let mut sink = RecordingSink::default();
        let saved = exporter()
            .run(&Page::parse(PAGE), ExportFormat::Text, &mut sink)
            .unwrap();

        assert_eq!(saved.filename, "Test_chat.txt");
        assert_eq!(saved.mime, "text/plain;charset=utf-8");
        let body = String::from_utf8(sink.saved[0].bytes.clone()).unwrap();
        assert!(body.starts_with("Title: Test_chat\nURL: http://x\n\n---\n\n"));
    }

    #[test]
    fn test_run_many_produces_both() {
        let mut sink = RecordingSink::default();
        let saved = exporter()
            .run_many(&Page::parse(PAGE), &ExportFormat::ALL, &mut sink)
            .unwrap();
        let names: Vec<&str> = saved.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, ["Test_chat.txt", "Test_chat.json"]);
    }

    #[test]
    fn test_no_content_never_reaches_sink() {
        let mut sink = RecordingSink::default();
        let page = Page::parse(r#"<h1 class="share-title">Empty</h1>"#);
        let err = exporter()
            .run(&page, ExportFormat::Json, &mut sink)
            .unwrap_err();
        assert!(matches!(err, ExportError::NoContentFound));
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn test_run_many_writes_nothing_when_a_target_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Test_chat.json"), "old").unwrap();
        let mut sink = crate::export::DirectorySink::new(dir.path());

        let err = exporter()
            .run_many(&Page::parse(PAGE), &ExportFormat::ALL, &mut sink)
            .unwrap_err();

        assert!(matches!(err, ExportError::AlreadyExists(_)));
        assert!(!dir.path().join("Test_chat.txt").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Test_chat.json")).unwrap(),
            "old"
        );
    }

    #[test]
    fn test_repeated_runs_match() {
        let page = Page::parse(PAGE);
        let exporter = exporter();
        assert_eq!(
            exporter.artifact(&page, ExportFormat::Json).unwrap(),
            exporter.artifact(&page, ExportFormat::Json).unwrap()
        );
    }
}
