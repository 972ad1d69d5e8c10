//! Where export controls attach on the share page.
//!
//! Controls go directly after the title section. Installing is skipped when
//! the anchor is missing or a controls container is already present, so a
//! repeated install is a no-op.

use crate::error::{ExportError, Result};
use crate::page::Page;
use crate::selectors::CompiledSelectors;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlsStatus {
    /// The element controls attach after is present.
    pub anchor_present: bool,
    /// A controls container with the configured id already exists.
    pub already_installed: bool,
}

impl ControlsStatus {
    pub fn can_install(&self) -> bool {
        self.anchor_present && !self.already_installed
    }
}

/// Inspect the page for the controls anchor and an existing install.
pub fn check_controls(page: &Page, selectors: &CompiledSelectors) -> ControlsStatus {
    let status = ControlsStatus {
        anchor_present: page.contains(&selectors.controls_anchor),
        already_installed: page.contains(&selectors.controls),
    };
    if !status.anchor_present {
        warn!("controls anchor not found on page");
    } else if status.already_installed {
        debug!("export controls already installed");
    }
    status
}

/// Like [`check_controls`], but a missing anchor is an error.
pub fn require_anchor(page: &Page, selectors: &CompiledSelectors) -> Result<ControlsStatus> {
    let status = check_controls(page, selectors);
    if !status.anchor_present {
        return Err(ExportError::MissingStructuralTarget(
            "controls anchor".to_string(),
        ));
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;

    fn status_of(html: &str) -> ControlsStatus {
        let selectors = SelectorConfig::default().compile().unwrap();
        check_controls(&Page::parse(html), &selectors)
    }

    #[test]
    fn test_anchor_present() {
        let status = status_of(r#"<div class="share-title-section"></div>"#);
        assert!(status.anchor_present);
        assert!(!status.already_installed);
        assert!(status.can_install());
    }

    #[test]
    fn test_already_installed() {
        let status = status_of(
            r#"<div class="share-title-section"></div><div id="gemini-exporter-buttons"></div>"#,
        );
        assert!(status.already_installed);
        assert!(!status.can_install());
    }

    #[test]
    fn test_missing_anchor_is_reported() {
        let selectors = SelectorConfig::default().compile().unwrap();
        let page = Page::parse("<body></body>");
        assert!(!check_controls(&page, &selectors).can_install());
        assert!(matches!(
            require_anchor(&page, &selectors),
            Err(ExportError::MissingStructuralTarget(_))
        ));
    }
}
