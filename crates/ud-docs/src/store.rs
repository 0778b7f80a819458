//! Code tab store.
//!
//! Provides the [`CodeTabStore`] trait the `codetab` shortcode looks records up
//! through, and [`MemoryCodeTabStore`] for hosts that load records up front.

use std::path::{Path, PathBuf};

use ud_shortcode::{BoxError, PageId};

use crate::CodeTab;

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Seed file could not be read.
    #[error("Failed to read code tabs from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Seed data is not a valid JSON array of records.
    #[error("Invalid code tab data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Backend-specific failure from a host store.
    #[error("Code tab store error: {0}")]
    Backend(#[source] BoxError),
}

/// Lookup of code tab records scoped to a page.
pub trait CodeTabStore: Send + Sync {
    /// Find the first record on `page_id` whose id equals the numeric value of
    /// `id_or_slug` or whose slug equals `id_or_slug`.
    ///
    /// "First" is the store's natural ordering.
    fn find_code_tab(
        &self,
        page_id: PageId,
        id_or_slug: &str,
    ) -> Result<Option<CodeTab>, StoreError>;
}

/// In-memory store keeping records in insertion order.
///
/// # Example
///
/// ```
/// use ud_docs::{CodeTab, CodeTabStore, MemoryCodeTabStore};
/// use ud_shortcode::PageId;
///
/// let page = PageId::new(1).unwrap();
/// let store = MemoryCodeTabStore::new()
///     .with_tab(CodeTab::new(10, page, "install").with_content("cargo install ud"));
///
/// let tab = store.find_code_tab(page, "install").unwrap().unwrap();
/// assert_eq!(tab.id, 10);
/// assert!(store.find_code_tab(page, "missing").unwrap().is_none());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryCodeTabStore {
    tabs: Vec<CodeTab>,
}

impl MemoryCodeTabStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tab(mut self, tab: CodeTab) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn insert(&mut self, tab: CodeTab) {
        self.tabs.push(tab);
    }

    /// Build a store from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let tabs: Vec<CodeTab> = serde_json::from_str(json)?;
        Ok(Self { tabs })
    }

    /// Build a store from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), count = store.len(), "Loaded code tabs");
        Ok(store)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

impl CodeTabStore for MemoryCodeTabStore {
    fn find_code_tab(
        &self,
        page_id: PageId,
        id_or_slug: &str,
    ) -> Result<Option<CodeTab>, StoreError> {
        Ok(self
            .tabs
            .iter()
            .find(|tab| tab.page_id == page_id && tab.matches(id_or_slug))
            .cloned())
    }
}
