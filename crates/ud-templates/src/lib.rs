//! Presentation templates for userdocs shortcodes.
//!
//! Handlers render through the [`TemplateRenderer`] trait so hosts can plug in
//! their own engine. [`TeraTemplates`] is the bundled implementation: it ships
//! the three built-in templates and lets a directory override any of them.
//!
//! | Template       | Data keys |
//! |----------------|-----------|
//! | [`CODE_INLINE`] | `content` |
//! | [`CODE_BLOCK`]  | `content`, `language` (string or null) |
//! | [`CODE_TAB`]    | `id`, `slug`, `title`, `language`, `content` |
//!
//! Autoescaping is off: `content` is already HTML produced by the shortcode
//! parser.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tera::Tera;

/// Inline code presentation.
pub const CODE_INLINE: &str = "CodeInline";
/// Block code presentation with optional language label.
pub const CODE_BLOCK: &str = "CodeBlock";
/// One tab of a tabbed code display.
pub const CODE_TAB: &str = "CodeTab";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (CODE_INLINE, include_str!("../templates/CodeInline.html")),
    (CODE_BLOCK, include_str!("../templates/CodeBlock.html")),
    (CODE_TAB, include_str!("../templates/CodeTab.html")),
];

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No template registered under this name.
    #[error("Template not found: {0}")]
    NotFound(String),
    /// Override file could not be read.
    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Template failed to compile or render.
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),
}

/// Renders a named template with structured data.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `data` (a JSON object).
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError>;
}

/// Tera-backed renderer with built-in templates.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use ud_templates::{CODE_INLINE, TemplateRenderer, TeraTemplates};
///
/// let templates = TeraTemplates::new().unwrap();
/// let html = templates.render(CODE_INLINE, &json!({ "content": "ls -la" })).unwrap();
/// assert_eq!(html, r#"<code class="code-inline">ls -la</code>"#);
/// ```
#[derive(Debug)]
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    /// Create a renderer with the built-in templates only.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for (name, source) in BUILTIN_TEMPLATES {
            tera.add_raw_template(name, source)?;
        }
        Ok(Self { tera })
    }

    /// Create a renderer whose built-ins are overridden by `<Name>.html` files in `dir`.
    ///
    /// Files that don't match a built-in name are ignored with a warning.
    /// A missing directory is not an error.
    pub fn with_overrides(dir: &Path) -> Result<Self, TemplateError> {
        let mut templates = Self::new()?;
        templates.load_overrides(dir)?;
        Ok(templates)
    }

    fn load_overrides(&mut self, dir: &Path) -> Result<(), TemplateError> {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "Template override directory not found");
            return Ok(());
        }

        for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
            let path = entry.map_err(io_err(dir))?.path();
            if path.extension().is_none_or(|ext| ext != "html") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            if !BUILTIN_TEMPLATES.iter().any(|(name, _)| *name == stem) {
                tracing::warn!(path = %path.display(), "Ignoring unknown template override");
                continue;
            }

            let source = std::fs::read_to_string(&path).map_err(io_err(&path))?;
            self.tera.add_raw_template(stem, &source)?;
            tracing::debug!(template = stem, path = %path.display(), "Loaded template override");
        }

        Ok(())
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> TemplateError + use<> {
    let path = path.to_path_buf();
    move |source| TemplateError::Io { path, source }
}

impl TemplateRenderer for TeraTemplates {
    fn render(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|name| name == template) {
            return Err(TemplateError::NotFound(template.to_owned()));
        }
        let context = tera::Context::from_value(data.clone())?;
        Ok(self.tera.render(template, &context)?)
    }
}
