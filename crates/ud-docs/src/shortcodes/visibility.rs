//! `logged_in` and `not_logged_in` shortcodes.
//!
//! Gate content on whether the render context has an authenticated user.

use ud_shortcode::{ShortcodeArgs, ShortcodeError, ShortcodeHandler, ShortcodeParser};

/// Shows its content only to authenticated users.
pub struct LoggedInShortcode;

/// Shows its content only to anonymous visitors.
pub struct NotLoggedInShortcode;

fn gate(
    visible: bool,
    content: Option<&str>,
    parser: &mut ShortcodeParser<'_>,
) -> Result<String, ShortcodeError> {
    if visible {
        parser.parse(content.unwrap_or_default())
    } else {
        Ok(String::new())
    }
}

impl ShortcodeHandler for LoggedInShortcode {
    fn handle(
        &self,
        _args: &ShortcodeArgs,
        content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        _tag: &str,
    ) -> Result<String, ShortcodeError> {
        let visible = parser.context().is_logged_in();
        gate(visible, content, parser)
    }
}

impl ShortcodeHandler for NotLoggedInShortcode {
    fn handle(
        &self,
        _args: &ShortcodeArgs,
        content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        _tag: &str,
    ) -> Result<String, ShortcodeError> {
        let visible = !parser.context().is_logged_in();
        gate(visible, content, parser)
    }
}
