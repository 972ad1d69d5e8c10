//! `gemini-export export <INPUT>` — write the conversation as text and/or JSON.

use crate::cli::input;
use crate::cli::output::{self, OutputMode, Styled};
use crate::error::ExportError;
use crate::export::{DirectorySink, ExportFormat, SavedArtifact, StdoutSink};
use crate::extraction::resolve_source;
use crate::page::Page;
use crate::pipeline::Exporter;
use crate::readiness::{wait_for, RetryPolicy};
use crate::selectors::CompiledSelectors;
use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::{debug, info};

const NO_CONTENT_MESSAGE: &str = "No conversation content found to export.";

/// How an export invocation ended, short of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Exported,
    /// The page had nothing to export; no file was produced.
    NoContent,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Exported => 0,
            ExitStatus::NoContent => 2,
        }
    }
}

/// Options for one export invocation.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Snapshot path, or `-` for stdin.
    pub input: String,
    pub formats: Vec<ExportFormat>,
    /// Source address override.
    pub url: Option<String>,
    pub out_dir: PathBuf,
    /// Write artifacts to stdout instead of `out_dir`.
    pub to_stdout: bool,
    pub overwrite: bool,
    pub selectors: Option<PathBuf>,
    /// Re-read the input until it contains a turn.
    pub wait: Option<RetryPolicy>,
}

/// Formats to produce. Without an explicit choice, files get both formats
/// and stdout gets JSON; stdout never carries more than one format.
pub fn select_formats(requested: Option<&[ExportFormat]>, to_stdout: bool) -> Result<Vec<ExportFormat>> {
    match requested {
        None if to_stdout => Ok(vec![ExportFormat::Json]),
        None => Ok(ExportFormat::ALL.to_vec()),
        Some(formats) if to_stdout && formats.len() > 1 => {
            bail!("--stdout writes a single format; pass --format txt or --format json")
        }
        Some(formats) => Ok(formats.to_vec()),
    }
}

/// Run the export command.
pub async fn run(opts: &ExportOptions, mode: &OutputMode) -> Result<ExitStatus> {
    if opts.to_stdout && opts.formats.len() != 1 {
        bail!("--stdout writes a single format; pass --format txt or --format json");
    }

    let selectors = input::load_selectors(opts.selectors.as_deref())?;

    let html = match &opts.wait {
        Some(policy) => wait_for_turns(&opts.input, &selectors, policy).await?,
        None => input::read_html(&opts.input)?,
    };

    let page = Page::parse(&html);
    let source = resolve_source(&page, opts.url.as_deref(), &input::fallback_source(&opts.input));
    debug!("export source: {source}");
    let exporter = Exporter::new(selectors, source);

    let result = if opts.to_stdout {
        exporter.run_many(&page, &opts.formats, &mut StdoutSink::new())
    } else {
        let mut sink = DirectorySink::new(&opts.out_dir).overwrite(opts.overwrite);
        exporter.run_many(&page, &opts.formats, &mut sink)
    };

    match result {
        Ok(saved) => {
            report(&saved, opts.to_stdout, mode);
            Ok(ExitStatus::Exported)
        }
        Err(ExportError::NoContentFound) => {
            emit(no_content_notice(mode, opts.to_stdout, &Styled::new(mode)));
            Ok(ExitStatus::NoContent)
        }
        Err(e) => Err(e.into()),
    }
}

/// A line of user-facing output and the stream it belongs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Stdout(String),
    Stderr(String),
    Silent,
}

fn emit(notice: Notice) {
    match notice {
        Notice::Stdout(line) => println!("{line}"),
        Notice::Stderr(line) => eprintln!("{line}"),
        Notice::Silent => {}
    }
}

/// What to tell the user when the page has nothing to export. JSON goes
/// to stdout only when stdout is not reserved for an artifact.
pub fn no_content_notice(mode: &OutputMode, to_stdout: bool, s: &Styled) -> Notice {
    if mode.json && !to_stdout {
        let body = serde_json::json!({
            "error": "no_content",
            "message": NO_CONTENT_MESSAGE,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(json) => Notice::Stdout(json),
            Err(_) => Notice::Silent,
        }
    } else if mode.quiet {
        Notice::Silent
    } else {
        Notice::Stderr(format!("  {} {NO_CONTENT_MESSAGE}", s.warn_sym()))
    }
}

/// Poll the input file until its page contains at least one turn.
async fn wait_for_turns(
    input: &str,
    selectors: &CompiledSelectors,
    policy: &RetryPolicy,
) -> Result<String> {
    if input == input::STDIN {
        bail!("--wait needs a file input; stdin can only be read once");
    }

    info!(
        "waiting for turns in {input} (up to {} attempts)",
        policy.attempts()
    );
    let html = wait_for(policy, |attempt| {
        let html = input::read_html(input).ok()?;
        let turns = Page::parse(&html).count(&selectors.turn);
        debug!("attempt {attempt}: {turns} turn(s)");
        (turns > 0).then_some(html)
    })
    .await?;
    Ok(html)
}

fn report(saved: &[SavedArtifact], to_stdout: bool, mode: &OutputMode) {
    if mode.json && !to_stdout {
        output::print_json(&serde_json::json!({ "exported": saved }));
        return;
    }
    if mode.quiet {
        return;
    }

    let s = Styled::new(mode);
    for artifact in saved {
        let target = artifact
            .location
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        eprintln!(
            "  {} {} {}",
            s.ok_sym(),
            s.green(&artifact.filename),
            s.dim(&format!(
                "({}, {}) -> {target}",
                artifact.mime,
                output::format_size(artifact.bytes as u64)
            ))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: &str = r#"<h1 class="share-title">Chat</h1>
        <share-turn-viewer><div class="query-text">Hi</div><message-content>Hello</message-content></share-turn-viewer>"#;

    fn quiet() -> OutputMode {
        OutputMode {
            quiet: true,
            ..Default::default()
        }
    }

    fn options(input: String, out_dir: PathBuf) -> ExportOptions {
        ExportOptions {
            input,
            formats: ExportFormat::ALL.to_vec(),
            url: Some("http://x".into()),
            out_dir,
            to_stdout: false,
            overwrite: false,
            selectors: None,
            wait: None,
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Exported.code(), 0);
        assert_eq!(ExitStatus::NoContent.code(), 2);
    }

    #[test]
    fn test_select_formats_defaults() {
        assert_eq!(select_formats(None, false).unwrap(), ExportFormat::ALL.to_vec());
        assert_eq!(select_formats(None, true).unwrap(), vec![ExportFormat::Json]);
        assert_eq!(
            select_formats(Some(&[ExportFormat::Text]), true).unwrap(),
            vec![ExportFormat::Text]
        );
    }

    #[test]
    fn test_select_formats_rejects_both_on_stdout() {
        assert!(select_formats(Some(&ExportFormat::ALL), true).is_err());
        assert!(select_formats(Some(&ExportFormat::ALL), false).is_ok());
    }

    #[tokio::test]
    async fn test_run_rejects_both_formats_on_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, CHAT).unwrap();

        let mut opts = options(input.display().to_string(), dir.path().to_path_buf());
        opts.to_stdout = true;

        let err = run(&opts, &quiet()).await.unwrap_err();
        assert!(err.to_string().contains("single format"));
    }

    #[tokio::test]
    async fn test_run_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, CHAT).unwrap();
        let out = dir.path().join("out");

        let status = run(&options(input.display().to_string(), out.clone()), &quiet())
            .await
            .unwrap();

        assert_eq!(status, ExitStatus::Exported);
        assert!(out.join("Chat.txt").is_file());
        assert!(out.join("Chat.json").is_file());
    }

    #[tokio::test]
    async fn test_run_no_content_status() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, r#"<h1 class="share-title">Loading</h1>"#).unwrap();
        let out = dir.path().join("out");

        let status = run(&options(input.display().to_string(), out.clone()), &quiet())
            .await
            .unwrap();

        assert_eq!(status, ExitStatus::NoContent);
        assert_eq!(status.code(), 2);
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_wait_rejects_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(input::STDIN.to_string(), dir.path().to_path_buf());
        opts.wait = Some(RetryPolicy::new(1, std::time::Duration::ZERO));

        let err = run(&opts, &quiet()).await.unwrap_err();
        assert!(err.to_string().contains("--wait needs a file input"));
    }

    #[test]
    fn test_no_content_notice_text() {
        let mode = OutputMode::default();
        let notice = no_content_notice(&mode, false, &Styled::new(&mode));
        assert_eq!(
            notice,
            Notice::Stderr("  ?? No conversation content found to export.".to_string())
        );
    }

    #[test]
    fn test_no_content_notice_json() {
        let mode = OutputMode {
            json: true,
            ..Default::default()
        };
        let Notice::Stdout(raw) = no_content_notice(&mode, false, &Styled::new(&mode)) else {
            panic!("expected JSON on stdout");
        };
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["error"], "no_content");
        assert_eq!(value["message"], "No conversation content found to export.");
    }

    #[test]
    fn test_no_content_notice_json_with_stdout_artifact() {
        let mode = OutputMode {
            json: true,
            ..Default::default()
        };
        assert!(matches!(
            no_content_notice(&mode, true, &Styled::new(&mode)),
            Notice::Stderr(_)
        ));
    }

    #[test]
    fn test_no_content_notice_quiet() {
        let mode = quiet();
        assert_eq!(
            no_content_notice(&mode, false, &Styled::new(&mode)),
            Notice::Silent
        );
    }
}
