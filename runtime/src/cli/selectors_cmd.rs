//! `gemini-export selectors` — print the built-in selector set.

use crate::selectors::SelectorConfig;
use anyhow::Result;

/// Print the default selectors as JSON, a starting point for `--selectors`.
pub async fn run() -> Result<()> {
    let json = serde_json::to_string_pretty(&SelectorConfig::default())?;
    println!("{json}");
    Ok(())
}
