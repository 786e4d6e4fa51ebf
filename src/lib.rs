//! # rmdown
//!
//! Import handwritten-notebook text into an Obsidian vault as Markdown.
//!
//! Documents and pages in a notebook catalog are tagged on the device for
//! import. This library renders their recognized text to Markdown, applies
//! a matching vault template and flips the tag once the note is written.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rmdown::{import, ImportConfig};
//!
//! fn main() -> rmdown::Result<()> {
//!     let config = ImportConfig::new()
//!         .with_catalog_dir("xochitl")
//!         .with_vault_dir("vault")
//!         .with_import_all(true);
//!
//!     let report = import(config)?;
//!     println!("{} note(s) written", report.imported.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paragraph styles**: headings, bold lines, bullets and checkboxes
//! - **Whole-document or per-page import**: driven by device tags
//! - **Templates**: tag or collection names select a vault template
//! - **Idempotent**: imported units are retagged and never imported twice

pub mod catalog;
pub mod error;
pub mod import;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use catalog::{Catalog, CollectionRegistry, JsonSceneDecoder, SceneDecoder};
pub use error::{Error, Result};
pub use import::{
    AlwaysConfirm, Confirm, ImportConfig, ImportReport, ImportState, ImportStateMachine,
    Importer, SaveOutcome, Vault,
};
pub use model::{
    Collection, ContentDescriptor, Document, MetadataDescriptor, Page, Paragraph, ParagraphStyle,
    Tag, TextRun,
};
pub use render::{MarkdownRenderer, StyleRenderer, Template, TemplateMatch, TemplateStore};

use std::path::Path;

/// Load a document from a catalog using the JSON text-layer decoder.
///
/// # Example
///
/// ```no_run
/// use rmdown::load_document;
///
/// let doc = load_document("xochitl", "0f0e0d0c-1111-2222-3333-444455556666").unwrap();
/// println!("{} has {} page(s)", doc.name, doc.page_count());
/// ```
pub fn load_document<P: AsRef<Path>>(catalog_dir: P, id: &str) -> Result<Document> {
    let catalog = Catalog::new(catalog_dir.as_ref());
    let mut registry = CollectionRegistry::new();
    catalog.load_document(id, &JsonSceneDecoder::new(), &mut registry)
}

/// Render a catalog document to Markdown.
///
/// Returns `Ok(None)` when no page of the document carries text.
///
/// # Example
///
/// ```no_run
/// use rmdown::to_markdown;
///
/// if let Some(markdown) = to_markdown("xochitl", "0f0e0d0c-1111-2222-3333-444455556666")? {
///     std::fs::write("note.md", markdown)?;
/// }
/// # Ok::<(), rmdown::Error>(())
/// ```
pub fn to_markdown<P: AsRef<Path>>(catalog_dir: P, id: &str) -> Result<Option<String>> {
    let doc = load_document(catalog_dir, id)?;
    Ok(render::document_to_markdown(&doc, None))
}

/// Run an import without prompting.
///
/// Every tagged document is processed, regardless of `config.import_all`.
pub fn import(config: ImportConfig) -> Result<ImportReport> {
    let mut importer = Importer::new(config, JsonSceneDecoder::new());
    importer.run(&mut AlwaysConfirm)
}
