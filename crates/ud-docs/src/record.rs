//! Code tab records.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use ud_shortcode::PageId;

/// One tab of a tabbed code display, owned by a page.
///
/// Addressable from content by numeric `id` or by `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTab {
    pub id: u64,
    pub page_id: PageId,
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl CodeTab {
    #[must_use]
    pub fn new(id: u64, page_id: PageId, slug: impl Into<String>) -> Self {
        Self {
            id,
            page_id,
            slug: slug.into(),
            title: String::new(),
            language: None,
            content: String::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Whether `id_or_slug` addresses this record.
    ///
    /// Matches when the leading number of `id_or_slug` equals `id`, or when it
    /// equals `slug` exactly. Page scoping is the store's job.
    #[must_use]
    pub fn matches(&self, id_or_slug: &str) -> bool {
        leading_number(id_or_slug) == Some(self.id) || self.slug == id_or_slug
    }

    /// Data handed to the `CodeTab` template.
    #[must_use]
    pub fn template_data(&self) -> Value {
        json!({
            "id": self.id,
            "page_id": self.page_id.get(),
            "slug": self.slug,
            "title": self.title,
            "language": self.language,
            "content": self.content,
        })
    }
}

/// Numeric interpretation of an argument: its leading decimal digits.
///
/// Leading whitespace and a `+` sign are skipped. Returns `None` when there are
/// no digits or the number overflows.
#[must_use]
pub fn leading_number(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
