//! Process-wide registry slot.
//!
//! Hosts that render from many places install one registry at startup and
//! read it everywhere afterwards. The slot can be written exactly once.

use std::sync::OnceLock;

use crate::{ShortcodeError, ShortcodeRegistry};

static GLOBAL: OnceLock<ShortcodeRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// Returns [`ShortcodeError::AlreadyInstalled`] if a registry was installed before;
/// the new one is dropped and the existing one stays in place.
pub fn install(registry: ShortcodeRegistry) -> Result<&'static ShortcodeRegistry, ShortcodeError> {
    let tags = registry.len();
    GLOBAL
        .set(registry)
        .map_err(|_| ShortcodeError::AlreadyInstalled)?;

    tracing::debug!(tags, "Installed global shortcode registry");
    GLOBAL.get().ok_or(ShortcodeError::AlreadyInstalled)
}

/// The process-wide registry, if one has been installed.
#[must_use]
pub fn global() -> Option<&'static ShortcodeRegistry> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderContext, ShortcodeParser};

    // The only test in this crate that touches the global slot.
    #[test]
    fn test_install_is_single_shot() {
        let mut first = ShortcodeRegistry::new();
        first
            .register_fn("site", |_args, _content, _parser, _tag| Ok("docs".to_owned()))
            .unwrap();

        let installed = install(first).unwrap();
        assert!(installed.contains("site"));
        assert!(global().is_some_and(|r| r.contains("site")));

        let err = install(ShortcodeRegistry::new()).unwrap_err();
        assert!(matches!(err, ShortcodeError::AlreadyInstalled));
        assert!(global().is_some_and(|r| r.contains("site")));

        let ctx = RenderContext::default();
        let out = ShortcodeParser::new(installed, &ctx).parse("[site]").unwrap();
        assert_eq!(out, "docs");
    }
}
