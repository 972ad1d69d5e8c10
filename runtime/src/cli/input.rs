//! Reading page snapshots from a file or stdin.

use crate::extraction::source::file_source;
use crate::page::Page;
use crate::selectors::{CompiledSelectors, SelectorConfig};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Input argument meaning "read from stdin".
pub const STDIN: &str = "-";

/// Read the raw HTML for `input`.
pub fn read_html(input: &str) -> Result<String> {
    if input == STDIN {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("reading page from stdin")?;
        return Ok(html);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
}

/// Read and parse `input`.
pub fn load_page(input: &str) -> Result<Page> {
    Ok(Page::parse(&read_html(input)?))
}

/// Source address to record when neither `--url` nor the page provides one.
pub fn fallback_source(input: &str) -> String {
    if input == STDIN {
        "stdin".to_string()
    } else {
        file_source(Path::new(input))
    }
}

/// Load selectors from `path`, or the built-in set when `None`.
pub fn load_selectors(path: Option<&Path>) -> Result<CompiledSelectors> {
    let config = match path {
        Some(p) => SelectorConfig::from_file(p)
            .with_context(|| format!("loading selectors from {}", p.display()))?,
        None => SelectorConfig::default(),
    };
    Ok(config.compile()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_source_stdin() {
        assert_eq!(fallback_source("-"), "stdin");
    }

    #[test]
    fn test_read_html_missing_file() {
        let err = read_html("/definitely/not/here.html").unwrap_err();
        assert!(err.to_string().contains("reading /definitely/not/here.html"));
    }

    #[test]
    fn test_load_selectors_default() {
        assert!(load_selectors(None).is_ok());
    }

    #[test]
    fn test_load_selectors_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "title": "[[" }"#).unwrap();
        assert!(load_selectors(Some(&path)).is_err());
    }
}
