//! Shortcode error type.

use std::error::Error;

/// Boxed error raised by a handler.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors from registering or dispatching shortcodes.
///
/// Content faults (unknown ids, missing arguments) never surface here; handlers
/// render those as literal text. Only faults the host must deal with do.
#[derive(Debug, thiserror::Error)]
pub enum ShortcodeError {
    /// A handler is already bound to this tag.
    #[error("Shortcode [{0}] is already registered")]
    AlreadyRegistered(String),
    /// The name is reserved and can never become a tag.
    #[error("'{0}' is reserved and cannot be registered as a shortcode")]
    ReservedName(String),
    /// The name contains characters the parser would never match.
    #[error("Invalid shortcode name '{0}'")]
    InvalidName(String),
    /// The process-wide registry was installed before.
    #[error("A global shortcode registry is already installed")]
    AlreadyInstalled,
    /// A handler failed in a way that must abort the render.
    #[error("Shortcode [{tag}] failed: {source}")]
    Handler {
        /// Tag that was being expanded.
        tag: String,
        /// Underlying failure.
        #[source]
        source: BoxError,
    },
}

impl ShortcodeError {
    /// Wrap a handler failure with the tag it occurred in.
    #[must_use]
    pub fn handler(tag: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Handler {
            tag: tag.into(),
            source: source.into(),
        }
    }

    /// Downcast a handler failure to a concrete error type.
    #[must_use]
    pub fn downcast_source<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Handler { source, .. } => source.downcast_ref(),
            _ => None,
        }
    }
}
