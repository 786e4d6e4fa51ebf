//! Page-level types.

use super::{Paragraph, ParagraphStyle};
use serde::{Deserialize, Serialize};

/// A single page of a notebook document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page id (the scene file stem)
    pub id: String,

    /// Page number (1-indexed position in the page list, 0 if unknown)
    pub number: u32,

    /// Display name, used as the output file name in page mode
    pub name: String,

    /// Tags scoped to this page
    pub tags: Vec<String>,

    /// Parsed text body; `None` for image-only or blank pages
    pub body: Option<Vec<Paragraph>>,
}

impl Page {
    /// Create a page, deriving its display name from the owning document's name.
    ///
    /// An empty body is stored as `None`.
    pub fn new(
        id: impl Into<String>,
        number: u32,
        document_name: &str,
        tags: Vec<String>,
        body: Option<Vec<Paragraph>>,
    ) -> Self {
        let body = body.filter(|paragraphs| !paragraphs.is_empty());
        let name = display_name(document_name, number, body.as_deref());
        Self {
            id: id.into(),
            number,
            name,
            tags,
            body,
        }
    }

    /// Check if the page carries a text layer.
    pub fn has_text(&self) -> bool {
        self.body.is_some()
    }

    /// Paragraphs of the text layer (empty when there is none).
    pub fn paragraphs(&self) -> &[Paragraph] {
        self.body.as_deref().unwrap_or_default()
    }

    /// Check if the page carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// "Document - Page N", upgraded to "Document - Heading" when the page opens with a heading.
fn display_name(document_name: &str, number: u32, body: Option<&[Paragraph]>) -> String {
    let heading = body
        .and_then(|paragraphs| paragraphs.first())
        .filter(|first| first.style == ParagraphStyle::Heading)
        .and_then(|first| first.first_run_text())
        .filter(|text| !text.trim().is_empty());

    match heading {
        Some(text) => format!("{} - {}", document_name, text)
            .replace('/', " - ")
            .trim()
            .to_string(),
        None => format!("{} - Page {}", document_name, number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default_name() {
        let page = Page::new("p1", 3, "Notes", vec![], None);
        assert_eq!(page.name, "Notes - Page 3");
        assert!(!page.has_text());
        assert!(page.paragraphs().is_empty());
    }

    #[test]
    fn test_page_heading_name() {
        let body = vec![Paragraph::heading("Ideas/Plans "), Paragraph::plain("x")];
        let page = Page::new("p1", 1, "Notes", vec![], Some(body));
        assert_eq!(page.name, "Notes - Ideas - Plans");
    }

    #[test]
    fn test_page_non_heading_first_paragraph_keeps_number() {
        let body = vec![Paragraph::plain("Intro"), Paragraph::heading("Later")];
        let page = Page::new("p1", 2, "Notes", vec![], Some(body));
        assert_eq!(page.name, "Notes - Page 2");
    }

    #[test]
    fn test_empty_body_is_no_text() {
        let page = Page::new("p1", 1, "Notes", vec![], Some(Vec::new()));
        assert!(!page.has_text());
        assert_eq!(page.name, "Notes - Page 1");
    }

    #[test]
    fn test_heading_without_runs_keeps_number() {
        let body = vec![Paragraph::new(ParagraphStyle::Heading)];
        let page = Page::new("p1", 4, "Notes", vec![], Some(body));
        assert_eq!(page.name, "Notes - Page 4");
    }
}
