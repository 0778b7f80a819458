//! Tag registry.
//!
//! Maps tag names to handlers. Built once at startup, then shared read-only.

use std::collections::BTreeMap;
use std::fmt;

use crate::handler::FnHandler;
use crate::syntax::is_valid_tag_name;
use crate::{ShortcodeArgs, ShortcodeError, ShortcodeHandler, ShortcodeParser};

/// Names that can never be bound to a tag.
///
/// These are lifecycle and accessor names of content-system handler classes
/// that older shortcode collections exposed alongside real handlers.
pub const RESERVED_NAMES: &[&str] = &[
    "registerShortcodes",
    "register_shortcodes",
    "config",
    "create",
    "singleton",
    "stat",
    "uninherited",
    "set_stat",
];

/// Registry of shortcode handlers keyed by tag name.
///
/// Registration is single-shot per tag: binding a name twice is an error
/// rather than a silent overwrite.
///
/// # Example
///
/// ```
/// use ud_shortcode::{ShortcodeError, ShortcodeRegistry};
///
/// let mut registry = ShortcodeRegistry::new();
/// registry
///     .register_fn("year", |_args, _content, _parser, _tag| Ok("2024".to_owned()))
///     .unwrap();
///
/// assert!(registry.contains("year"));
/// assert!(matches!(
///     registry.register_fn("config", |_, _, _, _| Ok(String::new())),
///     Err(ShortcodeError::ReservedName(_))
/// ));
/// ```
#[derive(Default)]
pub struct ShortcodeRegistry {
    handlers: BTreeMap<String, Box<dyn ShortcodeHandler>>,
}

impl ShortcodeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to `name`.
    ///
    /// # Errors
    ///
    /// - [`ShortcodeError::ReservedName`] if `name` is in [`RESERVED_NAMES`]
    /// - [`ShortcodeError::InvalidName`] if the parser could never match `name`
    /// - [`ShortcodeError::AlreadyRegistered`] if `name` is already bound
    pub fn register<H>(&mut self, name: &str, handler: H) -> Result<(), ShortcodeError>
    where
        H: ShortcodeHandler + 'static,
    {
        if RESERVED_NAMES.contains(&name) {
            return Err(ShortcodeError::ReservedName(name.to_owned()));
        }
        if !is_valid_tag_name(name) {
            return Err(ShortcodeError::InvalidName(name.to_owned()));
        }
        if self.handlers.contains_key(name) {
            return Err(ShortcodeError::AlreadyRegistered(name.to_owned()));
        }

        tracing::debug!(tag = name, "Registered shortcode");
        self.handlers.insert(name.to_owned(), Box::new(handler));
        Ok(())
    }

    /// Bind a closure to `name`. Same rules as [`register`](Self::register).
    pub fn register_fn<F>(&mut self, name: &str, handler: F) -> Result<(), ShortcodeError>
    where
        F: Fn(&ShortcodeArgs, Option<&str>, &mut ShortcodeParser<'_>, &str) -> Result<String, ShortcodeError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, FnHandler(handler))
    }

    /// Look up the handler for a tag.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ShortcodeHandler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered tag names in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ShortcodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcodeRegistry")
            .field("tags", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
