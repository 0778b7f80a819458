//! Code sample, code tab and visibility shortcodes for documentation pages.
//!
//! | Tag | Arguments | Output |
//! |-----|-----------|--------|
//! | `[code]...[/code]` | `display`, `lang` | inline or block code sample |
//! | `[codetab id=".."]` | `id`, `page_id` | stored code tab of a page |
//! | `[logged_in]...[/logged_in]` | | content for authenticated users |
//! | `[not_logged_in]...[/not_logged_in]` | | content for anonymous visitors |
//!
//! Hosts either bind the handlers into their own registry with
//! [`register_shortcodes`] or use the [`UserDocs`] facade, which owns a registry
//! and renders text in one call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ud_docs::{CodeTab, MemoryCodeTabStore, UserDocs};
//! use ud_shortcode::{PageId, RenderContext};
//! use ud_templates::TeraTemplates;
//!
//! let page = PageId::new(3).unwrap();
//! let store = MemoryCodeTabStore::new()
//!     .with_tab(CodeTab::new(1, page, "install").with_content("cargo install ud"));
//! let docs = UserDocs::new(Arc::new(TeraTemplates::new().unwrap()), Arc::new(store)).unwrap();
//!
//! let ctx = RenderContext::new().with_page(page);
//! let rendered = docs
//!     .render("[not_logged_in]Sign in to run [code]ud[/code].[/not_logged_in]", &ctx)
//!     .unwrap();
//! assert_eq!(rendered.html, r#"Sign in to run <code class="code-inline">ud</code>."#);
//! ```

mod error;
mod record;
pub mod shortcodes;
mod store;

use std::sync::Arc;

use ud_config::Config;
use ud_shortcode::{
    DEFAULT_MAX_DEPTH, RenderContext, ShortcodeError, ShortcodeParser, ShortcodeRegistry,
};
use ud_templates::{TemplateRenderer, TeraTemplates};

pub use error::DocsError;
pub use record::{CodeTab, leading_number};
pub use store::{CodeTabStore, MemoryCodeTabStore, StoreError};

use shortcodes::{CodeShortcode, CodeTabShortcode, LoggedInShortcode, NotLoggedInShortcode};

/// Tags bound by [`register_shortcodes`].
pub const SHORTCODE_TAGS: &[&str] = &["code", "codetab", "logged_in", "not_logged_in"];

/// Bind the userdocs handlers into `registry`.
///
/// # Errors
///
/// Returns [`ShortcodeError::AlreadyRegistered`] if any of [`SHORTCODE_TAGS`]
/// is already bound, including when called twice on the same registry.
pub fn register_shortcodes(
    registry: &mut ShortcodeRegistry,
    templates: &Arc<dyn TemplateRenderer>,
    store: &Arc<dyn CodeTabStore>,
) -> Result<(), ShortcodeError> {
    registry.register("code", CodeShortcode::new(Arc::clone(templates)))?;
    registry.register(
        "codetab",
        CodeTabShortcode::new(Arc::clone(templates), Arc::clone(store)),
    )?;
    registry.register("logged_in", LoggedInShortcode)?;
    registry.register("not_logged_in", NotLoggedInShortcode)?;
    Ok(())
}

/// Result of [`UserDocs::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Text with all shortcodes expanded.
    pub html: String,
    /// Non-fatal problems hit while expanding (e.g. depth limit).
    pub warnings: Vec<String>,
}

/// Registry with the userdocs shortcodes, ready to render page text.
#[derive(Debug)]
pub struct UserDocs {
    registry: ShortcodeRegistry,
    max_depth: usize,
}

impl UserDocs {
    /// Build a registry holding the userdocs shortcodes.
    pub fn new(
        templates: Arc<dyn TemplateRenderer>,
        store: Arc<dyn CodeTabStore>,
    ) -> Result<Self, ShortcodeError> {
        let mut registry = ShortcodeRegistry::new();
        register_shortcodes(&mut registry, &templates, &store)?;
        Ok(Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Build from configuration: template overrides, code tab seed file and
    /// depth limit.
    pub fn from_config(config: &Config) -> Result<Self, DocsError> {
        let templates = match &config.templates_resolved.dir {
            Some(dir) => TeraTemplates::with_overrides(dir)?,
            None => TeraTemplates::new()?,
        };
        let store = match &config.codetabs_resolved.source {
            Some(path) => MemoryCodeTabStore::from_json_file(path)?,
            None => MemoryCodeTabStore::new(),
        };
        tracing::debug!(
            max_depth = config.shortcodes.max_depth,
            code_tabs = store.len(),
            "Configured userdocs shortcodes"
        );

        Ok(Self::new(Arc::new(templates), Arc::new(store))?
            .with_max_depth(config.shortcodes.max_depth))
    }

    /// Set the recursion limit for nested expansion.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &ShortcodeRegistry {
        &self.registry
    }

    /// Hand the registry over, e.g. to [`ud_shortcode::global::install`] or
    /// to register further host shortcodes.
    #[must_use]
    pub fn into_registry(self) -> ShortcodeRegistry {
        self.registry
    }

    /// Expand all shortcodes in `text` for the given request.
    ///
    /// # Errors
    ///
    /// Fails when a handler hits a fatal fault, such as `codetab` without a
    /// resolvable page. Content faults render as placeholders instead.
    pub fn render(&self, text: &str, context: &RenderContext) -> Result<Rendered, ShortcodeError> {
        let mut parser = ShortcodeParser::new(&self.registry, context).with_max_depth(self.max_depth);
        let html = parser.parse(text)?;
        Ok(Rendered {
            html,
            warnings: parser.into_warnings(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use ud_shortcode::{CurrentUser, PageId, RESERVED_NAMES};

    use crate::shortcodes::{NO_ID_PLACEHOLDER, NOT_FOUND_PLACEHOLDER};

    fn page(id: u64) -> PageId {
        PageId::new(id).unwrap()
    }

    fn deps() -> (Arc<dyn TemplateRenderer>, Arc<dyn CodeTabStore>) {
        let store = MemoryCodeTabStore::new()
            .with_tab(CodeTab::new(1, page(1), "install").with_content("cargo install ud"))
            .with_tab(CodeTab::new(2, page(2), "install").with_content("npm i ud"));
        (Arc::new(TeraTemplates::new().unwrap()), Arc::new(store))
    }

    fn docs() -> UserDocs {
        let (templates, store) = deps();
        UserDocs::new(templates, store).unwrap()
    }

    #[test]
    fn test_registers_exactly_the_handler_set() {
        let docs = docs();
        let tags: Vec<_> = docs.registry().tags().collect();
        assert_eq!(tags, vec!["code", "codetab", "logged_in", "not_logged_in"]);
        assert_eq!(tags, SHORTCODE_TAGS);
    }

    #[test]
    fn test_no_reserved_name_is_ever_a_tag() {
        let docs = docs();
        for name in RESERVED_NAMES {
            assert!(!docs.registry().contains(name), "{name} registered");
        }
    }

    #[test]
    fn test_double_registration_errors() {
        let (templates, store) = deps();
        let mut registry = ShortcodeRegistry::new();
        register_shortcodes(&mut registry, &templates, &store).unwrap();

        let err = register_shortcodes(&mut registry, &templates, &store).unwrap_err();
        assert!(matches!(err, ShortcodeError::AlreadyRegistered(tag) if tag == "code"));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_host_shortcodes_alongside() {
        let (templates, store) = deps();
        let mut registry = ShortcodeRegistry::new();
        registry
            .register_fn("year", |_args, _content, _parser, _tag| Ok("2026".to_owned()))
            .unwrap();
        register_shortcodes(&mut registry, &templates, &store).unwrap();

        let ctx = RenderContext::default();
        let html = ShortcodeParser::new(&registry, &ctx)
            .parse("[code]v[year][/code]")
            .unwrap();
        assert_eq!(html, r#"<code class="code-inline">v2026</code>"#);
    }

    #[test]
    fn test_render_page() {
        let ctx = RenderContext::new()
            .with_page(page(1))
            .with_user(CurrentUser::new(5));
        let rendered = docs()
            .render(
                "[logged_in][codetab id=install][/logged_in][not_logged_in]hidden[/not_logged_in]",
                &ctx,
            )
            .unwrap();
        assert!(rendered.html.contains("cargo install ud"));
        assert!(!rendered.html.contains("hidden"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn test_placeholders_are_output_not_errors() {
        let ctx = RenderContext::new().with_page(page(2));
        let rendered = docs()
            .render("[codetab] [codetab id=nope]", &ctx)
            .unwrap();
        assert_eq!(
            rendered.html,
            format!("{NO_ID_PLACEHOLDER} {NOT_FOUND_PLACEHOLDER}")
        );
    }

    #[test]
    fn test_missing_page_aborts_render() {
        let err = docs()
            .render("ok [codetab id=install]", &RenderContext::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_source::<DocsError>(),
            Some(DocsError::MissingPageId)
        ));
    }

    #[test]
    fn test_depth_limit_warning() {
        let ctx = RenderContext::new().with_user(CurrentUser::new(1));
        let rendered = docs()
            .with_max_depth(2)
            .render(
                "[logged_in]1[logged_in]2[logged_in]3[logged_in]4[/logged_in][/logged_in][/logged_in][/logged_in]",
                &ctx,
            )
            .unwrap();
        assert_eq!(rendered.html, "123[logged_in]4[/logged_in]");
        assert_eq!(rendered.warnings.len(), 1);
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("templates")).unwrap();
        std::fs::write(
            dir.path().join("templates/CodeInline.html"),
            "<tt>{{ content }}</tt>",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("codetabs.json"),
            r#"[{"id": 4, "page_id": 9, "slug": "run", "content": "ud run"}]"#,
        )
        .unwrap();

        let config = Config::from_toml_str(
            "[shortcodes]\nmax_depth = 5\n[templates]\ndir = \"templates\"\n[codetabs]\nsource = \"codetabs.json\"\n",
            dir.path(),
        )
        .unwrap();
        let docs = UserDocs::from_config(&config).unwrap();
        assert_eq!(docs.max_depth, 5);

        let ctx = RenderContext::new().with_page(page(9));
        let rendered = docs.render("[code]x[/code] [codetab id=4]", &ctx).unwrap();
        assert!(rendered.html.starts_with("<tt>x</tt> "));
        assert!(rendered.html.contains("ud run"));
    }

    #[test]
    fn test_from_config_missing_seed_file() {
        let config = Config::from_toml_str(
            "[codetabs]\nsource = \"missing.json\"\n",
            Path::new("/nonexistent"),
        )
        .unwrap();
        let err = UserDocs::from_config(&config).unwrap_err();
        assert!(matches!(err, DocsError::Store(StoreError::Io { .. })));
    }

    #[test]
    fn test_default_config() {
        let docs = UserDocs::from_config(&Config::default()).unwrap();
        assert_eq!(docs.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(docs.registry().len(), 4);
    }
}
