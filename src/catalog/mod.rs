//! Notebook catalog access.
//!
//! A catalog is a directory holding one sub-directory per document, named by
//! the document's UUID, next to `<uuid>.content` and `<uuid>.metadata`
//! descriptors. Scene files live inside the document directory as
//! `<page-id>.rm`.

mod decoder;
mod registry;

pub use decoder::{JsonSceneDecoder, SceneDecoder};
pub use registry::{CollectionRegistry, TRASH_ID};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ContentDescriptor, Document, MetadataDescriptor, Page};

/// Descriptor body the device writes for an empty descriptor.
const BLANK_DESCRIPTOR: &str = "Blank";

/// Suffix of the thumbnail directories sitting next to documents.
const THUMBNAILS_SUFFIX: &str = ".thumbnails";

/// A notebook catalog rooted at a directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    uuid_pattern: Regex,
}

impl Catalog {
    /// Open a catalog rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            uuid_pattern: Regex::new(
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
            )
            .expect("static regex"),
        }
    }

    /// The catalog root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if a directory name has the 8-4-4-4-12 UUID shape.
    pub fn is_document_id(&self, name: &str) -> bool {
        self.uuid_pattern.is_match(name)
    }

    /// Ids of every document directory in the catalog, sorted.
    pub fn document_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.ends_with(THUMBNAILS_SUFFIX) || !self.is_document_id(&name) {
                continue;
            }
            ids.push(name);
        }
        ids.sort();
        Ok(ids)
    }

    /// Ids of the documents carrying `filter_tag` on the document or on any page.
    ///
    /// With no filter every document id is returned.
    pub fn scan(&self, filter_tag: Option<&str>) -> Result<Vec<String>> {
        let ids = self.document_ids()?;
        let Some(tag) = filter_tag else {
            return Ok(ids);
        };

        let mut output = Vec::new();
        for id in ids {
            let content = self.read_content(&id)?;
            let tagged = content
                .tag_names()
                .chain(content.page_tag_names())
                .any(|name| name == tag);
            if tagged {
                output.push(id);
            }
        }
        log::debug!("{} document(s) tagged {}", output.len(), tag);
        Ok(output)
    }

    /// Path of a descriptor file.
    pub fn descriptor_path(&self, id: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, extension))
    }

    /// Read the `.content` descriptor of an entry.
    pub fn read_content(&self, id: &str) -> Result<ContentDescriptor> {
        self.read_descriptor(&self.descriptor_path(id, "content"))
    }

    /// Read the `.metadata` descriptor of an entry.
    pub fn read_metadata(&self, id: &str) -> Result<MetadataDescriptor> {
        self.read_descriptor(&self.descriptor_path(id, "metadata"))
    }

    /// Missing, blank and malformed descriptors all read as the default value.
    fn read_descriptor<T>(&self, path: &Path) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if !path.is_file() {
            log::debug!("Descriptor {} is missing", path.display());
            return Ok(T::default());
        }

        let data = fs::read_to_string(path)?;
        let data = data.trim();
        if data == BLANK_DESCRIPTOR || data.is_empty() {
            return Ok(T::default());
        }

        match serde_json::from_str(data) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Ignoring malformed descriptor {}: {}", path.display(), e);
                Ok(T::default())
            }
        }
    }

    /// Load a document, decoding the text layer of every live page.
    ///
    /// The parent collection, if any, is resolved through `registry`.
    pub fn load_document<D>(
        &self,
        id: &str,
        decoder: &D,
        registry: &mut CollectionRegistry,
    ) -> Result<Document>
    where
        D: SceneDecoder + ?Sized,
    {
        let dir = self.root.join(id);
        if !dir.is_dir() && !self.descriptor_path(id, "content").is_file() {
            return Err(Error::DocumentNotFound(id.to_string()));
        }

        let content = self.read_content(id)?;
        let metadata = self.read_metadata(id)?;

        let mut doc = Document::new(id, metadata.visible_name.clone());
        doc.parent = metadata.parent_id().map(str::to_string);
        doc.background = content.has_pdf_background();

        if let Some(parent) = doc.parent.as_deref() {
            registry.register_child(self, parent, id)?;
        }

        for (index, entry) in content.page_entries().iter().enumerate() {
            if entry.is_deleted() {
                continue;
            }
            let scene = dir.join(format!("{}.rm", entry.id));
            let body = decoder.decode(&scene)?;
            let tags = content.tags_for_page(&entry.id);
            doc.add_page(Page::new(
                entry.id.clone(),
                (index + 1) as u32,
                &metadata.visible_name,
                tags,
                body,
            ));
        }

        doc.content = content;
        log::debug!("Loaded {} ({} pages)", doc.name, doc.page_count());
        Ok(doc)
    }

    /// Persist the document's content descriptor.
    pub fn save_content(&self, doc: &Document) -> Result<()> {
        let path = self.descriptor_path(&doc.id, "content");
        let mut file = fs::File::create(&path)?;
        file.write_all(&to_json_indented(&doc.content)?)?;
        Ok(())
    }
}

/// Serialize as JSON indented with four spaces.
fn to_json_indented<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
