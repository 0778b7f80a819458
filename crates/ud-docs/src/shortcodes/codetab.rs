//! `codetab` shortcode.
//!
//! ```text
//! [codetab id="install"]
//! [codetab id="12" page_id="3"]
//! ```

use std::sync::Arc;

use ud_shortcode::{PageId, ShortcodeArgs, ShortcodeError, ShortcodeHandler, ShortcodeParser};
use ud_templates::{CODE_TAB, TemplateRenderer};

use crate::{CodeTabStore, DocsError};

/// Output when the `id` argument is missing.
pub const NO_ID_PLACEHOLDER: &str = "[codetab: No id/slug was supplied]";

/// Output when no record on the page matches `id`.
pub const NOT_FOUND_PLACEHOLDER: &str =
    "[codetab: id/slug was not found as a registered codetab for the active page]";

/// Renders a stored code tab addressed by id or slug.
///
/// The page is the `page_id` argument when given, otherwise the page being
/// rendered. An unresolvable page (no current page, or `page_id` empty or
/// `0`) is a fatal error; a missing or unknown `id` renders a bracketed
/// placeholder for content authors to see.
pub struct CodeTabShortcode {
    templates: Arc<dyn TemplateRenderer>,
    store: Arc<dyn CodeTabStore>,
}

impl CodeTabShortcode {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>, store: Arc<dyn CodeTabStore>) -> Self {
        Self { templates, store }
    }

    /// Page whose tabs `[codetab]` addresses.
    ///
    /// `Ok(None)` is a `page_id` that names no page (e.g. `home`); it owns no
    /// tabs. Only a page that cannot be resolved at all is an error.
    fn resolve_page(
        args: &ShortcodeArgs,
        parser: &ShortcodeParser<'_>,
    ) -> Result<Option<PageId>, DocsError> {
        let Some(raw) = args.get("page_id") else {
            return parser
                .context()
                .page_id
                .map(Some)
                .ok_or(DocsError::MissingPageId);
        };

        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DocsError::MissingPageId);
        }
        match raw.parse::<u64>() {
            Ok(id) => PageId::new(id).map(Some).ok_or(DocsError::MissingPageId),
            Err(_) => Ok(None),
        }
    }
}

impl ShortcodeHandler for CodeTabShortcode {
    fn handle(
        &self,
        args: &ShortcodeArgs,
        _content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        tag: &str,
    ) -> Result<String, ShortcodeError> {
        let page_id = Self::resolve_page(args, parser).map_err(|err| err.into_handler_error(tag))?;

        let Some(id_or_slug) = args.get("id") else {
            return Ok(NO_ID_PLACEHOLDER.to_owned());
        };

        let tab = match page_id {
            Some(page_id) => self
                .store
                .find_code_tab(page_id, id_or_slug)
                .map_err(|err| DocsError::from(err).into_handler_error(tag))?,
            None => None,
        };
        let Some(tab) = tab else {
            tracing::debug!(page_id = ?page_id, id = id_or_slug, "Code tab not found");
            return Ok(NOT_FOUND_PLACEHOLDER.to_owned());
        };

        let html = super::render(self.templates.as_ref(), tag, CODE_TAB, &tab.template_data())?;
        parser.parse(&html)
    }
}
