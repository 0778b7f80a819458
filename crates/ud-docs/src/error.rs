//! Error type for the userdocs shortcodes.

use ud_shortcode::ShortcodeError;
use ud_templates::TemplateError;

use crate::StoreError;

/// Errors raised by the userdocs handlers and setup.
///
/// Handler failures reach the host wrapped in [`ShortcodeError::Handler`];
/// use [`ShortcodeError::downcast_source`] to get this type back.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// `codetab` could not resolve a page: no `page_id` argument and no
    /// current page, or a `page_id` that is empty or `0`.
    #[error("Cannot resolve a page to render code tabs for")]
    MissingPageId,
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Shortcode(#[from] ShortcodeError),
}

impl DocsError {
    /// Wrap into the dispatcher's error for `tag`.
    pub(crate) fn into_handler_error(self, tag: &str) -> ShortcodeError {
        match self {
            Self::Shortcode(err) => err,
            other => ShortcodeError::handler(tag, other),
        }
    }
}
