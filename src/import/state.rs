//! Tag-driven import state of documents and pages.
//!
//! A unit moves `Untagged -> Pending -> Imported`. The last step only happens
//! after its note was written, and never for units pinned with the keep
//! sentinel.

use crate::model::{Document, Page};

use super::SaveOutcome;

/// Tag marking a unit as pending import.
pub const DEFAULT_IMPORT_TAG: &str = "Obsidian/Import";

/// Tag a unit carries after a successful import.
pub const DEFAULT_IMPORTED_TAG: &str = "Obsidian/Imported";

/// Name or tag of placeholder entries whose tags are never changed.
pub const KEEP_SENTINEL: &str = ".keep";

/// Name of documents that are skipped entirely.
pub const IGNORE_SENTINEL: &str = ".ignore";

/// Import state of a document or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    /// Carries neither import tag
    Untagged,
    /// Tagged for import
    Pending,
    /// Already imported
    Imported,
}

/// Classifies units and applies the `Pending -> Imported` transition.
#[derive(Debug, Clone)]
pub struct ImportStateMachine {
    import_tag: String,
    imported_tag: String,
}

impl ImportStateMachine {
    /// Create a state machine using the given tag names.
    pub fn new(import_tag: impl Into<String>, imported_tag: impl Into<String>) -> Self {
        Self {
            import_tag: import_tag.into(),
            imported_tag: imported_tag.into(),
        }
    }

    /// Tag marking pending units.
    pub fn import_tag(&self) -> &str {
        &self.import_tag
    }

    /// Tag marking imported units.
    pub fn imported_tag(&self) -> &str {
        &self.imported_tag
    }

    /// Classify a tag set. The pending tag wins over the imported one.
    pub fn classify<'a, I>(&self, tags: I) -> ImportState
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = ImportState::Untagged;
        for tag in tags {
            if tag == self.import_tag {
                return ImportState::Pending;
            }
            if tag == self.imported_tag {
                state = ImportState::Imported;
            }
        }
        state
    }

    /// State of a document from its document-level tags.
    pub fn document_state(&self, doc: &Document) -> ImportState {
        self.classify(doc.tags())
    }

    /// State of a page from its page-level tags.
    pub fn page_state(&self, page: &Page) -> ImportState {
        self.classify(page.tags.iter().map(String::as_str))
    }

    /// Whether a document is a keep placeholder.
    pub fn is_pinned_document(&self, doc: &Document) -> bool {
        doc.name == KEEP_SENTINEL || doc.has_tag(KEEP_SENTINEL)
    }

    /// Whether a page belongs to a keep placeholder or is tagged as one.
    pub fn is_pinned_page(&self, doc: &Document, page: &Page) -> bool {
        self.is_pinned_document(doc) || page.has_tag(KEEP_SENTINEL)
    }

    /// Mark a document imported after its note was saved.
    ///
    /// Returns `true` if the tags changed and the descriptor needs saving.
    pub fn complete_document(&self, doc: &mut Document, outcome: &SaveOutcome) -> bool {
        if !outcome.is_written() || self.is_pinned_document(doc) {
            return false;
        }
        if self.document_state(doc) != ImportState::Pending {
            return false;
        }
        doc.rename_tag(&self.import_tag, &self.imported_tag)
    }

    /// Mark the page at `index` imported after its note was saved.
    ///
    /// Returns `true` if the tags changed and the descriptor needs saving.
    pub fn complete_page(&self, doc: &mut Document, index: usize, outcome: &SaveOutcome) -> bool {
        if !outcome.is_written() {
            return false;
        }
        let Some(page) = doc.pages.get(index) else {
            return false;
        };
        if self.is_pinned_page(doc, page) || self.page_state(page) != ImportState::Pending {
            return false;
        }
        doc.rename_page_tag(index, &self.import_tag, &self.imported_tag)
    }
}

impl Default for ImportStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORT_TAG, DEFAULT_IMPORTED_TAG)
    }
}
