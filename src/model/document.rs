//! Document-level types.

use super::{ContentDescriptor, Page};
use serde::{Deserialize, Serialize};

/// A notebook document loaded from the catalog.
///
/// The document owns its pages and its content descriptor; the parent collection
/// is referenced by id only and resolved through a
/// [`CollectionRegistry`](crate::catalog::CollectionRegistry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document id (the catalog directory name)
    pub id: String,

    /// Visible name
    pub name: String,

    /// Parent collection id, `None` at the root
    pub parent: Option<String>,

    /// Whether the notebook is drawn over a PDF
    pub background: bool,

    /// Live pages, in page-list order
    pub pages: Vec<Page>,

    /// Content descriptor, persisted after tag changes
    pub content: ContentDescriptor,
}

impl Document {
    /// Create a new empty document.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            background: false,
            pages: Vec::new(),
            content: ContentDescriptor::default(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Pages that carry a text layer.
    pub fn text_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|page| page.has_text())
    }

    /// Names of the document-level tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.content.tag_names()
    }

    /// Check if the document carries the given document-level tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }

    /// Rename the first document-level tag named `from`.
    ///
    /// Returns `false` when no such tag exists.
    pub fn rename_tag(&mut self, from: &str, to: &str) -> bool {
        match self.content.tags.iter_mut().find(|tag| tag.name == from) {
            Some(tag) => {
                tag.name = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Rename the first tag named `from` scoped to the page at `index`.
    ///
    /// Keeps the page's tag list in step with the descriptor.
    pub fn rename_page_tag(&mut self, index: usize, from: &str, to: &str) -> bool {
        let Some(page) = self.pages.get_mut(index) else {
            return false;
        };
        let renamed = self
            .content
            .page_tags
            .iter_mut()
            .find(|tag| tag.page_id.as_deref() == Some(page.id.as_str()) && tag.name == from)
            .map(|tag| tag.name = to.to_string())
            .is_some();

        if renamed {
            if let Some(tag) = page.tags.iter_mut().find(|t| *t == from) {
                *tag = to.to_string();
            }
        }
        renamed
    }
}
