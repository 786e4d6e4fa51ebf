//! Rendering module for converting notebook content to Markdown.

mod cleanup;
mod markdown;
mod template;

pub use cleanup::Normalizer;
pub use markdown::{
    document_to_markdown, page_to_markdown, render_fragment, style_prefix, to_markdown,
    MarkdownRenderer, StyleRenderer,
};
pub use template::{select_template, Template, TemplateMatch, TemplateStore, SELECTION_MARKER};
