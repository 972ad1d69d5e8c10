//! Save collaborators: where finished artifacts end up.

use super::artifact::ExportArtifact;
use crate::error::{ExportError, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tracing::info;

/// Record of a completed save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedArtifact {
    pub filename: String,
    pub mime: String,
    pub bytes: usize,
    /// Where the file was written, for sinks that write files.
    pub location: Option<PathBuf>,
}

impl SavedArtifact {
    fn from_artifact(artifact: &ExportArtifact, location: Option<PathBuf>) -> Self {
        Self {
            filename: artifact.filename.clone(),
            mime: artifact.mime.to_string(),
            bytes: artifact.bytes.len(),
            location,
        }
    }
}

/// Accepts `(bytes, filename, mime)` and persists it somewhere.
pub trait SaveSink {
    /// Check that every artifact of one request can be saved, before any is.
    fn prepare(&mut self, _artifacts: &[ExportArtifact]) -> Result<()> {
        Ok(())
    }

    fn save(&mut self, artifact: &ExportArtifact) -> Result<SavedArtifact>;
}

/// Writes each artifact to `<dir>/<filename>`.
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Replace files that already exist instead of failing.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl SaveSink for DirectorySink {
    fn prepare(&mut self, artifacts: &[ExportArtifact]) -> Result<()> {
        if self.overwrite {
            return Ok(());
        }
        for artifact in artifacts {
            let path = self.dir.join(&artifact.filename);
            if path.exists() {
                return Err(ExportError::AlreadyExists(path));
            }
        }
        Ok(())
    }

    fn save(&mut self, artifact: &ExportArtifact) -> Result<SavedArtifact> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.filename);

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = match options.open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ExportError::AlreadyExists(path));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&artifact.bytes)?;
        info!("wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(SavedArtifact::from_artifact(artifact, Some(path)))
    }
}

/// Streams artifact bytes to a writer, stdout by default.
pub struct StdoutSink<W: Write = std::io::Stdout> {
    writer: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            writer: std::io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SaveSink for StdoutSink<W> {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<SavedArtifact> {
        self.writer.write_all(&artifact.bytes)?;
        self.writer.flush()?;
        Ok(SavedArtifact::from_artifact(artifact, None))
    }
}
