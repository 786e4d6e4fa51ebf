//! Sidecar JSON descriptors stored next to each notebook.
//!
//! Only the fields the importer reads are modelled; everything else is kept in
//! `extra` so that re-writing a descriptor after a tag change preserves it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A tag record, optionally scoped to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,

    /// Page the tag belongs to (page tags only)
    #[serde(rename = "pageId", default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,

    /// Fields not interpreted by the importer (timestamps, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    /// Create a document-level tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page_id: None,
            extra: Map::new(),
        }
    }

    /// Create a tag scoped to a page.
    pub fn for_page(name: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
            ..Self::new(name)
        }
    }
}

/// The `.content` descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDescriptor {
    /// Document-level tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,

    /// Page-level tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_tags: Vec<Tag>,

    /// Page list
    #[serde(rename = "cPages", default, skip_serializing_if = "Option::is_none")]
    pub c_pages: Option<PageList>,

    /// Source file type ("notebook", "pdf", "epub")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentDescriptor {
    /// Entries of the page list, deleted ones included.
    pub fn page_entries(&self) -> &[PageEntry] {
        self.c_pages
            .as_ref()
            .map(|list| list.pages.as_slice())
            .unwrap_or_default()
    }

    /// Names of the document-level tags.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }

    /// Names of every page-level tag, regardless of page.
    pub fn page_tag_names(&self) -> impl Iterator<Item = &str> {
        self.page_tags.iter().map(|tag| tag.name.as_str())
    }

    /// Names of the tags scoped to one page.
    pub fn tags_for_page(&self, page_id: &str) -> Vec<String> {
        self.page_tags
            .iter()
            .filter(|tag| tag.page_id.as_deref() == Some(page_id))
            .map(|tag| tag.name.clone())
            .collect()
    }

    /// Whether the file type marks a PDF-backed document.
    pub fn has_pdf_background(&self) -> bool {
        self.file_type
            .as_deref()
            .is_some_and(|file_type| file_type.contains("pdf"))
    }
}

/// The `cPages` object of a content descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<PageEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the page list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page id
    pub id: String,

    /// Present when the page was deleted on the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageEntry {
    /// Create a live page entry.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: None,
            extra: Map::new(),
        }
    }

    /// Check if the page was deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}

/// The `.metadata` descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDescriptor {
    /// Name shown on the device
    #[serde(default = "untitled")]
    pub visible_name: String,

    /// Parent collection id; empty for the root
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent: String,

    /// Entry type ("DocumentType" or "CollectionType")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetadataDescriptor {
    /// Parent collection id, `None` at the root.
    pub fn parent_id(&self) -> Option<&str> {
        Some(self.parent.as_str()).filter(|parent| !parent.is_empty())
    }
}

impl Default for MetadataDescriptor {
    fn default() -> Self {
        Self {
            visible_name: untitled(),
            parent: String::new(),
            kind: None,
            extra: Map::new(),
        }
    }
}

fn untitled() -> String {
    "Untitled".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
