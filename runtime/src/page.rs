//! Parsed page snapshot and rendered-text reading.
//!
//! A [`Page`] is the document handle the extractor works against. It wraps
//! a `scraper` document and exposes the handful of queries extraction needs,
//! plus an `innerText`-style reader that turns an element subtree into the
//! text a reader would see on screen.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Elements whose subtree never contributes rendered text.
const SKIPPED: &[&str] = &["script", "style", "template", "noscript", "head"];

/// Elements whose text is rendered verbatim.
const PREFORMATTED: &[&str] = &["pre", "textarea", "listing", "plaintext"];

/// Elements surrounded by one required line break.
const BLOCKS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
];

/// A rendered page snapshot. Reading never mutates the document.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse an HTML document. Parsing is lenient: malformed markup yields
    /// a best-effort tree rather than an error.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            debug!("parsed page with {} recoverable HTML errors", document.errors.len());
        }
        Self { document }
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.document.select(selector)
    }

    /// First element matching `selector` in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.document.select(selector).next()
    }

    /// Whether any element matches `selector`.
    pub fn contains(&self, selector: &Selector) -> bool {
        self.select_first(selector).is_some()
    }

    /// Number of elements matching `selector`.
    pub fn count(&self, selector: &Selector) -> usize {
        self.document.select(selector).count()
    }
}

/// First descendant of `scope` matching `selector`, excluding `scope` itself.
pub fn select_within<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).find(|el| el.id() != scope.id())
}

/// Concatenated raw text of every descendant text node (`textContent`).
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of `element` as a reader sees it (`innerText`).
///
/// Whitespace collapses outside preformatted elements, `<br>` becomes a
/// newline, block elements start on their own line and paragraphs are
/// separated by a blank line. Table cells in a row are tab-separated.
/// Script and style content is dropped.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut chunks = Vec::new();
    collect_element(element, false, &mut chunks);
    assemble(chunks)
}

enum Chunk {
    Text { text: String, collapsible: bool },
    LineFeed,
    /// Required line breaks; adjacent runs merge to the largest.
    Break(usize),
    /// End of a table cell; a tab precedes the next cell's text.
    CellEnd,
}

fn collect_element(element: ElementRef<'_>, preformatted: bool, out: &mut Vec<Chunk>) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }
    if name == "br" {
        out.push(Chunk::LineFeed);
        return;
    }

    let preformatted = preformatted || PREFORMATTED.contains(&name);
    let breaks = if name == "p" {
        2
    } else if BLOCKS.contains(&name) {
        1
    } else {
        0
    };

    if breaks > 0 {
        out.push(Chunk::Break(breaks));
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, preformatted, out),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_element(child, preformatted, out);
                }
            }
            _ => {}
        }
    }

    if breaks > 0 {
        out.push(Chunk::Break(breaks));
    }
    if name == "td" || name == "th" {
        out.push(Chunk::CellEnd);
    }
}

fn push_text(raw: &str, preformatted: bool, out: &mut Vec<Chunk>) {
    if preformatted {
        out.push(Chunk::Text {
            text: raw.to_string(),
            collapsible: false,
        });
        return;
    }
    let text = collapse_whitespace(raw);
    if !text.is_empty() {
        out.push(Chunk::Text {
            text,
            collapsible: true,
        });
    }
}

/// Replace each run of HTML whitespace with a single space. Non-breaking
/// spaces are content, not whitespace.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn assemble(chunks: Vec<Chunk>) -> String {
    let mut out = String::new();
    let mut pending = 0;
    let mut pending_tab = false;

    for chunk in chunks {
        match chunk {
            Chunk::Break(n) => {
                pending = pending.max(n);
                pending_tab = false;
            }
            Chunk::CellEnd => pending_tab = true,
            Chunk::LineFeed => {
                pending_tab = false;
                flush_breaks(&mut out, &mut pending);
                trim_trailing_spaces(&mut out);
                out.push('\n');
            }
            Chunk::Text { text, collapsible } => {
                if pending_tab && collapsible && text.trim_matches(' ').is_empty() {
                    continue;
                }
                flush_breaks(&mut out, &mut pending);
                if pending_tab {
                    trim_trailing_spaces(&mut out);
                    out.push('\t');
                    pending_tab = false;
                }
                let at_line_start = out.is_empty() || out.ends_with([' ', '\t', '\n']);
                if collapsible && at_line_start {
                    out.push_str(text.trim_start_matches(' '));
                } else {
                    out.push_str(&text);
                }
            }
        }
    }

    out
}

fn flush_breaks(out: &mut String, pending: &mut usize) {
    if *pending > 0 && !out.is_empty() {
        trim_trailing_spaces(out);
        let existing = out.len() - out.trim_end_matches('\n').len();
        for _ in existing..*pending {
            out.push('\n');
        }
    }
    *pending = 0;
}

fn trim_trailing_spaces(out: &mut String) {
    let keep = out.trim_end_matches(' ').len();
    out.truncate(keep);
}
