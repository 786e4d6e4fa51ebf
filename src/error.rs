//! Error types for rmdown library.

use std::io;
use thiserror::Error;

/// Result type alias for rmdown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or importing notebooks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing or deserializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A paragraph carries a style code outside the supported set.
    ///
    /// This is fatal for the whole run: new device styles need an explicit
    /// rendering rule.
    #[error("Unsupported paragraph style: {0}")]
    UnsupportedStyle(u32),

    /// The selected template has no file in the template store.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The scene decoder could not produce a paragraph tree.
    #[error("Scene decoding error: {0}")]
    Decode(String),

    /// No document with this id exists in the catalog.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
}
