//! Source address of an exported conversation.

use crate::page::Page;
use scraper::Selector;
use tracing::debug;
use url::Url;

/// Pick the source address for an export.
///
/// Precedence: an explicit address, then the page's canonical link, then
/// its `og:url` meta tag, then `fallback`. Page-provided values are only
/// used when they are absolute URLs.
pub fn resolve_source(page: &Page, explicit: Option<&str>, fallback: &str) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    if let Some(url) = page_attr(page, r#"link[rel="canonical"]"#, "href") {
        debug!("using canonical link as source: {url}");
        return url;
    }

    if let Some(url) = page_attr(page, r#"meta[property="og:url"]"#, "content") {
        debug!("using og:url as source: {url}");
        return url;
    }

    fallback.to_string()
}

fn page_attr(page: &Page, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    page.select_all(&sel)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| Url::parse(value).is_ok())
        .map(String::from)
}

/// Source address for a local snapshot file: its `file://` URL when the
/// path can be made absolute, else the path as given.
pub fn file_source(path: &std::path::Path) -> String {
    std::fs::canonicalize(path)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
