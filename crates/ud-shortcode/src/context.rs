//! Render context.
//!
//! Carries the request-scoped facts handlers may consult: the page being
//! rendered and the authenticated user, if any.

use std::fmt;

/// Identifier of a page in the host content store. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u64", into = "u64")
)]
pub struct PageId(u64);

impl PageId {
    /// Create a page id. Returns `None` for zero, which the host uses for "no page".
    #[must_use]
    pub fn new(id: u64) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for PageId {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "page id cannot be 0".to_owned())
    }
}

impl From<PageId> for u64 {
    fn from(id: PageId) -> Self {
        id.0
    }
}

/// The authenticated user for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Member id in the host's authentication service.
    pub id: u64,
    /// Display name, if known.
    pub name: Option<String>,
}

impl CurrentUser {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self { id, name: None }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Context provided to shortcode handlers for a single render.
///
/// Created by the host per request and handed to
/// [`ShortcodeParser`](crate::ShortcodeParser). Handlers read it through
/// [`ShortcodeParser::context`](crate::ShortcodeParser::context).
///
/// # Example
///
/// ```
/// use ud_shortcode::{CurrentUser, PageId, RenderContext};
///
/// let ctx = RenderContext::new()
///     .with_page(PageId::new(7).unwrap())
///     .with_user(CurrentUser::new(1));
///
/// assert_eq!(ctx.page_id.map(PageId::get), Some(7));
/// assert!(ctx.is_logged_in());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Page currently being rendered, if the host knows it.
    pub page_id: Option<PageId>,
    /// Authenticated user, or `None` for anonymous visitors.
    pub current_user: Option<CurrentUser>,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page_id: PageId) -> Self {
        self.page_id = Some(page_id);
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }
}
