//! Shortcode dispatcher.
//!
//! Scans text for registered tags, invokes their handlers and substitutes the
//! output in place. Handlers receive the parser back so nested content can be
//! expanded recursively, bounded by a depth limit.

use std::collections::HashMap;

use crate::syntax::{self, Tag};
use crate::{RenderContext, ShortcodeArgs, ShortcodeError, ShortcodeRegistry};

/// Default maximum nesting of recursive `parse` calls.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Per-render shortcode parser.
///
/// Borrows the shared registry and the request's [`RenderContext`]; owns the
/// recursion counter and collected warnings. Create one per render.
///
/// # Syntax
///
/// - `[tag attrs]` and `[tag attrs /]`: self-closing, handler gets no content
/// - `[tag attrs]content[/tag]`: enclosing, handler gets the raw content
/// - `[[tag]]`: escaped, emitted as the literal `[tag]`
///
/// Unregistered tags and malformed brackets are left untouched.
///
/// # Example
///
/// ```
/// use ud_shortcode::{RenderContext, ShortcodeParser, ShortcodeRegistry};
///
/// let mut registry = ShortcodeRegistry::new();
/// registry
///     .register_fn("em", |_args, content, parser, _tag| {
///         Ok(format!("<em>{}</em>", parser.parse(content.unwrap_or_default())?))
///     })
///     .unwrap();
///
/// let ctx = RenderContext::default();
/// let mut parser = ShortcodeParser::new(&registry, &ctx);
/// assert_eq!(parser.parse("a [em]b[/em] [unknown]").unwrap(), "a <em>b</em> [unknown]");
/// assert_eq!(parser.parse("[[em]]").unwrap(), "[em]");
/// ```
pub struct ShortcodeParser<'a> {
    registry: &'a ShortcodeRegistry,
    context: &'a RenderContext,
    max_depth: usize,
    depth: usize,
    warnings: Vec<String>,
}

impl<'a> ShortcodeParser<'a> {
    #[must_use]
    pub fn new(registry: &'a ShortcodeRegistry, context: &'a RenderContext) -> Self {
        Self {
            registry,
            context,
            max_depth: DEFAULT_MAX_DEPTH,
            depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Set the maximum recursion depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Context of the render in progress.
    #[must_use]
    pub fn context(&self) -> &'a RenderContext {
        self.context
    }

    /// Current nesting level (0 outside any `parse` call).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the parser, returning its warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    /// Expand all registered shortcodes in `text`.
    ///
    /// Reentrant: handlers call this on their content or output. Past the
    /// depth limit the text is returned unparsed and a warning is recorded.
    ///
    /// # Errors
    ///
    /// Propagates the first handler error; the partial output is discarded.
    pub fn parse(&mut self, text: &str) -> Result<String, ShortcodeError> {
        if self.depth > self.max_depth {
            let warning = format!("Maximum shortcode depth ({}) exceeded", self.max_depth);
            tracing::warn!(max_depth = self.max_depth, "{warning}");
            self.warnings.push(warning);
            return Ok(text.to_owned());
        }

        self.depth += 1;
        let result = self.expand(text);
        self.depth -= 1;
        result
    }

    fn expand(&mut self, text: &str) -> Result<String, ShortcodeError> {
        let mut output = String::with_capacity(text.len());
        let mut pos = 0;
        // Per tag name, built on first use so unclosed tags cost one scan in total
        let mut closers: HashMap<&str, HashMap<usize, Option<(usize, usize)>>> = HashMap::new();

        while let Some(rel) = text[pos..].find('[') {
            let start = pos + rel;
            output.push_str(&text[pos..start]);

            // Escaped: [[tag ...]] -> [tag ...]
            if text[start..].starts_with("[[")
                && let Some(tag) = syntax::parse_tag(text, start + 1)
                && text[tag.end()..].starts_with(']')
            {
                output.push_str(&text[start + 1..tag.end()]);
                pos = tag.end() + 1;
                continue;
            }

            match syntax::parse_tag(text, start) {
                Some(Tag::Open {
                    name,
                    attrs,
                    self_closing,
                    end,
                }) if self.registry.contains(name) => {
                    let (content, next) = if self_closing {
                        (None, end)
                    } else {
                        let index = closers
                            .entry(name)
                            .or_insert_with(|| syntax::match_closers(text, name));
                        let close = match index.get(&end) {
                            Some(close) => *close,
                            None => syntax::find_close(text, name, end),
                        };
                        match close {
                            Some((close_start, close_end)) => {
                                (Some(&text[end..close_start]), close_end)
                            }
                            None => (None, end),
                        }
                    };

                    let args = ShortcodeArgs::parse(attrs);
                    let expanded = self.dispatch(name, &args, content)?;
                    output.push_str(&expanded);
                    pos = next;
                }
                _ => {
                    output.push('[');
                    pos = start + 1;
                }
            }
        }

        output.push_str(&text[pos..]);
        Ok(output)
    }

    fn dispatch(
        &mut self,
        tag: &str,
        args: &ShortcodeArgs,
        content: Option<&str>,
    ) -> Result<String, ShortcodeError> {
        let registry = self.registry;
        let Some(handler) = registry.get(tag) else {
            return Ok(String::new());
        };

        tracing::debug!(
            tag,
            args = %args.to_syntax(),
            depth = self.depth,
            "Dispatching shortcode"
        );
        handler.handle(args, content, self, tag)
    }
}
