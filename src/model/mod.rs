//! Document model types for notebook content representation.
//!
//! This module defines the intermediate representation that bridges scene
//! decoding, catalog descriptors and markdown rendering.

mod collection;
mod descriptor;
mod document;
mod page;
mod paragraph;

pub use collection::Collection;
pub use descriptor::{ContentDescriptor, MetadataDescriptor, PageEntry, PageList, Tag};
pub use document::Document;
pub use page::Page;
pub use paragraph::{FontStyle, FontWeight, Paragraph, ParagraphStyle, RunProperties, TextRun};
