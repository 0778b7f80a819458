//! `code` shortcode.
//!
//! ```text
//! [code]cargo build[/code]
//! [code display="block" lang="rust"]fn main() {}[/code]
//! ```

use std::sync::Arc;

use serde_json::json;
use ud_shortcode::{ShortcodeArgs, ShortcodeError, ShortcodeHandler, ShortcodeParser};
use ud_templates::{CODE_BLOCK, CODE_INLINE, TemplateRenderer};

/// Characters stripped before the blank-content check. Narrower than
/// [`str::trim`]: a no-break space is content.
const BLANK: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Renders a code sample inline or as a block.
///
/// `display` absent or `"inline"` selects the inline template; any other value
/// selects the block template, which also receives `lang`. Blank content
/// renders nothing.
pub struct CodeShortcode {
    templates: Arc<dyn TemplateRenderer>,
}

impl CodeShortcode {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>) -> Self {
        Self { templates }
    }
}

impl ShortcodeHandler for CodeShortcode {
    fn handle(
        &self,
        args: &ShortcodeArgs,
        content: Option<&str>,
        parser: &mut ShortcodeParser<'_>,
        tag: &str,
    ) -> Result<String, ShortcodeError> {
        let content = content.unwrap_or_default();
        if content.trim_matches(BLANK).is_empty() {
            return Ok(String::new());
        }

        let inner = parser.parse(content)?;
        match args.get("display") {
            None | Some("inline") => super::render(
                self.templates.as_ref(),
                tag,
                CODE_INLINE,
                &json!({ "content": inner }),
            ),
            Some(_) => {
                let html = super::render(
                    self.templates.as_ref(),
                    tag,
                    CODE_BLOCK,
                    &json!({ "content": inner, "language": args.get("lang") }),
                )?;
                // Block templates may carry shortcodes of their own
                parser.parse(&html)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocsError;
    use crate::shortcodes::test_support::{FailingTemplates, RecordingTemplates};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use ud_shortcode::{RenderContext, ShortcodeRegistry};
    use ud_templates::TeraTemplates;

    fn render_with(templates: Arc<dyn TemplateRenderer>, input: &str) -> String {
        let mut registry = ShortcodeRegistry::new();
        registry.register("code", CodeShortcode::new(templates)).unwrap();
        registry
            .register_fn("upper", |_args, content, _parser, _tag| {
                Ok(content.unwrap_or_default().to_uppercase())
            })
            .unwrap();
        let ctx = RenderContext::default();
        ShortcodeParser::new(&registry, &ctx).parse(input).unwrap()
    }

    fn render(input: &str) -> String {
        render_with(Arc::new(TeraTemplates::new().unwrap()), input)
    }

    #[test]
    fn test_blank_content_renders_nothing() {
        for input in ["[code][/code]", "[code]   [/code]", "[code display=\"block\"]\n\t[/code]", "[code]"] {
            assert_eq!(render(input), "", "input: {input:?}");
        }
    }

    #[test]
    fn test_inline_by_default() {
        assert_eq!(
            render("Run [code]ls[/code] now"),
            r#"Run <code class="code-inline">ls</code> now"#
        );
    }

    #[test]
    fn test_inline_ignores_lang() {
        let templates = Arc::new(RecordingTemplates::default());
        render_with(
            Arc::clone(&templates) as Arc<dyn TemplateRenderer>,
            r#"[code display="inline" lang="rust"]x[/code] [code lang="go"]y[/code]"#,
        );

        let calls = templates.calls();
        assert_eq!(calls.len(), 2);
        for (name, data) in &calls {
            assert_eq!(name, CODE_INLINE);
            assert!(data.get("language").is_none());
        }
    }

    #[test]
    fn test_block_with_lang() {
        assert_eq!(
            render(r#"[code display="block" lang="rust"]fn main() {}[/code]"#),
            r#"<pre class="code-block language-rust" data-language="rust"><code>fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_any_other_display_is_block() {
        let templates = Arc::new(RecordingTemplates::default());
        render_with(
            Arc::clone(&templates) as Arc<dyn TemplateRenderer>,
            r#"[code display="fenced" lang="C++ 17"]a[/code][code display=""]b[/code]"#,
        );

        let calls = templates.calls();
        assert_eq!(calls[0].0, CODE_BLOCK);
        assert_eq!(calls[0].1["language"], "C++ 17");
        assert_eq!(calls[1].0, CODE_BLOCK);
        assert_eq!(calls[1].1["language"], Value::Null);
    }

    #[test]
    fn test_nested_shortcodes_in_content() {
        assert_eq!(
            render("[code]x [upper]y[/upper][/code]"),
            r#"<code class="code-inline">x Y</code>"#
        );
    }

    #[test]
    fn test_block_output_is_parsed_again() {
        // The recording renderer echoes its input, so a shortcode produced by
        // the block template must be expanded in the second pass.
        let templates = Arc::new(RecordingTemplates::default());
        let html = render_with(
            templates,
            "[code display=\"block\"][[upper]]a[[/upper]][/code]",
        );
        assert_eq!(html, "CodeBlock:A");
    }

    #[test]
    fn test_template_failure_is_fatal() {
        let mut registry = ShortcodeRegistry::new();
        registry
            .register("code", CodeShortcode::new(Arc::new(FailingTemplates)))
            .unwrap();
        let ctx = RenderContext::default();

        let err = ShortcodeParser::new(&registry, &ctx)
            .parse("[code]x[/code]")
            .unwrap_err();
        assert!(matches!(&err, ShortcodeError::Handler { tag, .. } if tag == "code"));
        assert!(matches!(
            err.downcast_source::<DocsError>(),
            Some(DocsError::Template(_))
        ));
    }

    #[test]
    fn test_blank_check_keeps_unicode_spaces() {
        assert_eq!(render("[code]\0\x0B [/code]"), "");
        assert_eq!(
            render("[code]\u{a0}[/code]"),
            "<code class=\"code-inline\">\u{a0}</code>"
        );
    }
}
