//! `gemini-export inspect <INPUT>` — show what an export would contain.

use crate::cli::input;
use crate::cli::output::{self, OutputMode, Styled};
use crate::controls::require_anchor;
use crate::extraction::{derive_title, extract, resolve_source};
use crate::types::Role;
use anyhow::Result;
use std::path::Path;

/// Run the inspect command.
pub async fn run(
    input_path: &str,
    selectors_path: Option<&Path>,
    url: Option<&str>,
    mode: &OutputMode,
) -> Result<()> {
    let selectors = input::load_selectors(selectors_path)?;
    let page = input::load_page(input_path)?;

    let turns = page.count(&selectors.turn);
    let messages = extract(&page, &selectors);
    let title = derive_title(&page, &selectors);
    let source = resolve_source(&page, url, &input::fallback_source(input_path));
    let title_present = page.contains(&selectors.title);
    let anchor = require_anchor(&page, &selectors);
    let anchor_error = anchor.as_ref().err().map(|e| e.to_string());
    let installed = anchor.as_ref().is_ok_and(|status| status.already_installed);
    let user = messages.iter().filter(|m| m.role == Role::User).count();
    let assistant = messages.len() - user;

    if mode.json {
        output::print_json(&serde_json::json!({
            "title": title,
            "title_node": title_present,
            "url": source,
            "turns": turns,
            "messages": messages.len(),
            "user_messages": user,
            "assistant_messages": assistant,
            "controls": {
                "anchor_present": anchor_error.is_none(),
                "already_installed": installed,
                "anchor_error": anchor_error,
            },
            "exportable": !messages.is_empty(),
        }));
        return Ok(());
    }

    if mode.quiet {
        return Ok(());
    }

    let s = Styled::new(mode);
    output::print_header(&s);

    let title_sym = if title_present { s.ok_sym() } else { s.warn_sym() };
    output::print_check(title_sym, "Title:", &title);
    if !title_present {
        output::print_detail("title node missing, default title used");
    }
    output::print_check(s.ok_sym(), "URL:", &source);

    let turn_sym = if turns > 0 { s.ok_sym() } else { s.fail_sym() };
    output::print_check(turn_sym, "Turns:", &turns.to_string());

    let msg_sym = if messages.is_empty() { s.fail_sym() } else { s.ok_sym() };
    output::print_check(
        msg_sym,
        "Messages:",
        &format!("{} ({user} user, {assistant} assistant)", messages.len()),
    );

    match &anchor_error {
        None if installed => output::print_check(s.ok_sym(), "Anchor:", "present, controls installed"),
        None => output::print_check(s.ok_sym(), "Anchor:", "present"),
        Some(err) => {
            output::print_check(s.warn_sym(), "Anchor:", "missing");
            output::print_detail(err);
        }
    }

    if mode.verbose {
        for (i, message) in messages.iter().enumerate() {
            let preview: String = message.content.chars().take(60).collect();
            output::print_detail(&s.dim(&format!("{i:>3} {:<9} {}", message.role.as_str(), preview.replace('\n', " "))));
        }
    }

    eprintln!();
    if messages.is_empty() {
        eprintln!("  {}: {}", s.bold("Status"), s.yellow("nothing to export"));
    } else {
        eprintln!("  {}: {}", s.bold("Status"), s.green("ready"));
    }

    Ok(())
}
