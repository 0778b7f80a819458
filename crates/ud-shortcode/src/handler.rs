//! Shortcode handler trait.

use crate::{ShortcodeArgs, ShortcodeError, ShortcodeParser};

/// Handler bound to a shortcode tag.
///
/// Called once per occurrence of `[tag ...]` (or `[tag ...]content[/tag]`).
/// The parser is passed back in so handlers can expand shortcodes nested in
/// their content or in their own rendered output.
///
/// # Thread Safety
///
/// Handlers are `Send + Sync` and take `&self`: one registry is built at
/// startup and shared by every concurrent render. Per-render state lives in
/// the [`ShortcodeParser`].
///
/// # Example
///
/// ```
/// use ud_shortcode::{
///     RenderContext, ShortcodeArgs, ShortcodeError, ShortcodeHandler, ShortcodeParser,
///     ShortcodeRegistry,
/// };
///
/// struct Upper;
///
/// impl ShortcodeHandler for Upper {
///     fn handle(
///         &self,
///         _args: &ShortcodeArgs,
///         content: Option<&str>,
///         parser: &mut ShortcodeParser<'_>,
///         _tag: &str,
///     ) -> Result<String, ShortcodeError> {
///         Ok(parser.parse(content.unwrap_or_default())?.to_uppercase())
///     }
/// }
///
/// let mut registry = ShortcodeRegistry::new();
/// registry.register("upper", Upper).unwrap();
///
/// let ctx = RenderContext::default();
/// let out = ShortcodeParser::new(&registry, &ctx).parse("[upper]hi[/upper]").unwrap();
/// assert_eq!(out, "HI");
/// ```
pub trait ShortcodeHandler: Send + Sync {
    /// Expand one occurrence of the shortcode.
    ///
    /// `content` is `None` for self-closing tags. Return `Err` only for faults
    /// that must abort the whole render.
    fn handle(
        &self,
        args: &ShortcodeArgs,
        content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        tag: &str,
    ) -> Result<String, ShortcodeError>;
}

/// Adapter that lets a closure act as a handler.
///
/// Built by [`ShortcodeRegistry::register_fn`](crate::ShortcodeRegistry::register_fn).
pub(crate) struct FnHandler<F>(pub(crate) F);

impl<F> ShortcodeHandler for FnHandler<F>
where
    F: Fn(&ShortcodeArgs, Option<&str>, &mut ShortcodeParser<'_>, &str) -> Result<String, ShortcodeError>
        + Send
        + Sync,
{
    fn handle(
        &self,
        args: &ShortcodeArgs,
        content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        tag: &str,
    ) -> Result<String, ShortcodeError> {
        (self.0)(args, content, parser, tag)
    }
}
