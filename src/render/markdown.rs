//! Markdown rendering for notebook pages and documents.

use crate::model::{Document, Page, Paragraph, ParagraphStyle, TextRun};

use super::{Normalizer, Template};

/// Render a sequence of paragraphs to normalized Markdown.
///
/// Returns `None` when there is nothing to render.
pub fn to_markdown(paragraphs: &[Paragraph]) -> Option<String> {
    MarkdownRenderer::new().render_paragraphs(paragraphs)
}

/// Render one page, optionally wrapped in a template.
pub fn page_to_markdown(page: &Page, template: Option<&Template>) -> Option<String> {
    MarkdownRenderer::new().render_page(page, template)
}

/// Render a whole document, optionally wrapped in a template.
pub fn document_to_markdown(doc: &Document, template: Option<&Template>) -> Option<String> {
    MarkdownRenderer::new().render_document(doc, template)
}

/// Render a single paragraph given the style of the paragraph before it.
pub fn render_fragment(previous: ParagraphStyle, para: &Paragraph) -> String {
    let mut output = String::new();
    StyleRenderer::after(previous).render_paragraph(&mut output, para);
    output
}

/// Per-paragraph renderer carrying the previous paragraph's style.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleRenderer {
    previous: ParagraphStyle,
}

impl StyleRenderer {
    /// Create a renderer positioned at the start of a page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer positioned after a paragraph of the given style.
    pub fn after(previous: ParagraphStyle) -> Self {
        Self { previous }
    }

    /// Style of the last rendered paragraph.
    pub fn previous_style(&self) -> ParagraphStyle {
        self.previous
    }

    /// Append the Markdown for `para` to `output`.
    pub fn render_paragraph(&mut self, output: &mut String, para: &Paragraph) {
        // A list starting right after prose needs a blank line to be parsed as a list.
        if self.previous == ParagraphStyle::Plain && para.style.is_list_style() {
            output.push('\n');
        }

        output.push_str(style_prefix(para.style));

        for run in &para.runs {
            render_run(output, run);
        }

        output.push('\n');
        if para.style.is_heading_like() {
            output.push('\n');
        }

        self.previous = para.style;
    }
}

/// Line prefix for each paragraph style.
pub fn style_prefix(style: ParagraphStyle) -> &'static str {
    match style {
        ParagraphStyle::Plain => "",
        ParagraphStyle::Heading => "\n## ",
        ParagraphStyle::Bold => "\n### ",
        ParagraphStyle::Bullet => "- ",
        ParagraphStyle::Bullet2 => "    - ",
        ParagraphStyle::CheckboxEmpty => "- [ ] ",
        ParagraphStyle::CheckboxChecked => "- [x] ",
    }
}

/// Bold wraps outside italic: `**_text_**`.
fn render_run(output: &mut String, run: &TextRun) {
    let bold = run.properties.is_bold();
    let italic = run.properties.is_italic();

    if bold {
        output.push_str("**");
    }
    if italic {
        output.push('_');
    }
    output.push_str(&run.text);
    if italic {
        output.push('_');
    }
    if bold {
        output.push_str("**");
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    normalizer: Normalizer,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
        }
    }

    /// Compose paragraphs without normalization.
    pub fn compose_raw(&self, paragraphs: &[Paragraph]) -> String {
        let mut output = String::new();
        let mut renderer = StyleRenderer::new();
        for para in paragraphs {
            renderer.render_paragraph(&mut output, para);
        }
        output
    }

    /// Compose and normalize paragraphs.
    ///
    /// `None` when the body is empty or normalizes to nothing, e.g. a page of
    /// whitespace-only paragraphs.
    pub fn render_paragraphs(&self, paragraphs: &[Paragraph]) -> Option<String> {
        if paragraphs.is_empty() {
            return None;
        }
        Some(self.normalizer.process(&self.compose_raw(paragraphs)))
            .filter(|markdown| !markdown.is_empty())
    }

    /// Render one page. `None` if the page has no text layer.
    pub fn render_page(&self, page: &Page, template: Option<&Template>) -> Option<String> {
        let Some(markdown) = self.render_paragraphs(page.paragraphs()) else {
            log::debug!("Page {} has no text", page.id);
            return None;
        };

        let markdown = match template {
            Some(template) => template.bind(&markdown),
            None => markdown,
        };
        Some(markdown.trim().to_string())
    }

    /// Render a whole document: a title heading followed by every page with text.
    ///
    /// `None` if no page contributes any text.
    pub fn render_document(&self, doc: &Document, template: Option<&Template>) -> Option<String> {
        let mut output = format!("# {}\n\n", doc.name);
        let mut contributed = false;

        for page in doc.text_pages() {
            if let Some(markdown) = self.render_page(page, None) {
                output.push_str(&markdown);
                output.push('\n');
                contributed = true;
            }
        }

        if !contributed {
            log::debug!("Document {} has no text", doc.id);
            return None;
        }

        Some(match template {
            Some(template) => template.bind(&output),
            None => output,
        })
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontStyle, FontWeight};

    fn list(style: ParagraphStyle, text: &str) -> Paragraph {
        Paragraph::with_text(style, text)
    }

    #[test]
    fn test_single_paragraph_prefixes() {
        let expected = [
            (ParagraphStyle::Plain, "x\n"),
            (ParagraphStyle::Heading, "\n## x\n\n"),
            (ParagraphStyle::Bold, "\n### x\n\n"),
            (ParagraphStyle::Bullet, "\n- x\n"),
            (ParagraphStyle::Bullet2, "\n    - x\n"),
            (ParagraphStyle::CheckboxEmpty, "\n- [ ] x\n"),
            (ParagraphStyle::CheckboxChecked, "\n- [x] x\n"),
        ];
        for (style, fragment) in expected {
            assert_eq!(
                render_fragment(ParagraphStyle::Plain, &list(style, "x")),
                fragment,
                "{:?}",
                style
            );
        }
    }

    #[test]
    fn test_list_blank_line_only_after_plain() {
        let bullet = list(ParagraphStyle::Bullet, "x");
        assert_eq!(render_fragment(ParagraphStyle::Bullet, &bullet), "- x\n");
        assert_eq!(render_fragment(ParagraphStyle::Heading, &bullet), "- x\n");
        assert_eq!(render_fragment(ParagraphStyle::Plain, &bullet), "\n- x\n");
    }

    #[test]
    fn test_empty_paragraph() {
        let heading = Paragraph::new(ParagraphStyle::Heading);
        assert_eq!(render_fragment(ParagraphStyle::Plain, &heading), "\n## \n\n");

        let plain = Paragraph::new(ParagraphStyle::Plain);
        assert_eq!(render_fragment(ParagraphStyle::Plain, &plain), "\n");
    }

    #[test]
    fn test_plain_has_no_markdown_prefix() {
        let para = Paragraph::plain("just words");
        let fragment = render_fragment(ParagraphStyle::Bullet, &para);
        assert_eq!(fragment, "just words\n");
        assert!(!fragment.contains('#'));
        assert!(!fragment.contains('-'));
    }

    #[test]
    fn test_inline_styles() {
        let para = Paragraph::plain("a ")
            .run(TextRun::bold("b"))
            .run(TextRun::italic("c"))
            .run(
                TextRun::new("d")
                    .with_weight(FontWeight::Bold)
                    .with_style(FontStyle::Italic),
            );
        assert_eq!(
            render_fragment(ParagraphStyle::Plain, &para),
            "a **b**_c_**_d_**\n"
        );
    }

    #[test]
    fn test_renderer_tracks_previous_style() {
        let mut renderer = StyleRenderer::new();
        let mut output = String::new();
        renderer.render_paragraph(&mut output, &list(ParagraphStyle::CheckboxEmpty, "a"));
        assert_eq!(renderer.previous_style(), ParagraphStyle::CheckboxEmpty);
        renderer.render_paragraph(&mut output, &list(ParagraphStyle::CheckboxChecked, "b"));
        assert_eq!(output, "\n- [ ] a\n- [x] b\n");
    }

    #[test]
    fn test_bullets_without_leading_plain() {
        let body = vec![
            list(ParagraphStyle::Bullet, "one"),
            list(ParagraphStyle::Bullet, "two"),
        ];
        assert_eq!(to_markdown(&body).unwrap(), "- one\n- two");
    }

    #[test]
    fn test_bullets_after_plain() {
        let body = vec![
            Paragraph::plain("intro"),
            list(ParagraphStyle::Bullet, "one"),
            list(ParagraphStyle::Bullet, "two"),
        ];
        assert_eq!(to_markdown(&body).unwrap(), "intro\n\n- one\n- two");
    }

    #[test]
    fn test_nested_bullets_and_checkboxes() {
        let body = vec![
            list(ParagraphStyle::Bold, "Tasks"),
            list(ParagraphStyle::Bullet, "area"),
            list(ParagraphStyle::Bullet2, "detail"),
            list(ParagraphStyle::CheckboxEmpty, "open"),
            list(ParagraphStyle::CheckboxChecked, "done"),
        ];
        assert_eq!(
            to_markdown(&body).unwrap(),
            "### Tasks\n\n- area\n    - detail\n- [ ] open\n- [x] done"
        );
    }

    #[test]
    fn test_heading_after_plain_has_single_blank_line() {
        let body = vec![
            Paragraph::plain("before"),
            Paragraph::heading("Title"),
            Paragraph::plain("after"),
        ];
        assert_eq!(
            to_markdown(&body).unwrap(),
            "before\n\n## Title\n\nafter"
        );
    }

    #[test]
    fn test_never_three_newlines() {
        let body = vec![
            Paragraph::heading("A"),
            Paragraph::new(ParagraphStyle::Plain),
            Paragraph::new(ParagraphStyle::Plain),
            list(ParagraphStyle::Bold, "B"),
            Paragraph::heading("C"),
            Paragraph::plain("   "),
            list(ParagraphStyle::Bullet, "x"),
        ];
        let markdown = to_markdown(&body).unwrap();
        assert!(!markdown.contains("\n\n\n"), "{:?}", markdown);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let body = vec![
            Paragraph::heading("Title"),
            Paragraph::plain("x").run(TextRun::bold("y")),
            list(ParagraphStyle::Bullet, "z"),
        ];
        assert_eq!(to_markdown(&body), to_markdown(&body));
    }

    #[test]
    fn test_empty_body() {
        assert!(to_markdown(&[]).is_none());
    }

    #[test]
    fn test_blank_paragraphs_render_nothing() {
        let body = vec![Paragraph::plain("   "), Paragraph::new(ParagraphStyle::Plain)];
        assert!(to_markdown(&body).is_none());

        let page = Page::new("p1", 1, "Doc", vec![], Some(body));
        let template = Template::new("Meeting", "Header\n<% tp.file.selection() %>\n");
        assert!(page_to_markdown(&page, Some(&template)).is_none());
    }

    #[test]
    fn test_document_skips_blank_pages() {
        let mut doc = Document::new("d1", "Doc");
        doc.add_page(Page::new("p1", 1, "Doc", vec![], Some(vec![Paragraph::plain("  ")])));
        assert!(document_to_markdown(&doc, None).is_none());

        doc.add_page(Page::new("p2", 2, "Doc", vec![], Some(vec![Paragraph::plain("b")])));
        assert_eq!(document_to_markdown(&doc, None).unwrap(), "# Doc\n\nb\n");
    }

    #[test]
    fn test_document_composition() {
        let mut doc = Document::new("d1", "DocName");
        let body = vec![Paragraph::heading("Title"), Paragraph::plain("Hello world")];
        doc.add_page(Page::new("p1", 1, "DocName", vec![], Some(body)));
        doc.add_page(Page::new("p2", 2, "DocName", vec![], None));

        assert_eq!(
            document_to_markdown(&doc, None).unwrap(),
            "# DocName\n\n## Title\n\nHello world\n"
        );
    }

    #[test]
    fn test_document_pages_are_separated_by_newline() {
        let mut doc = Document::new("d1", "Doc");
        doc.add_page(Page::new("p1", 1, "Doc", vec![], Some(vec![Paragraph::plain("a")])));
        doc.add_page(Page::new("p2", 2, "Doc", vec![], Some(vec![Paragraph::plain("b")])));

        assert_eq!(document_to_markdown(&doc, None).unwrap(), "# Doc\n\na\nb\n");
    }

    #[test]
    fn test_document_without_text() {
        let mut doc = Document::new("d1", "Sketches");
        doc.add_page(Page::new("p1", 1, "Sketches", vec![], None));
        assert!(document_to_markdown(&doc, None).is_none());
    }

    #[test]
    fn test_page_with_template() {
        let page = Page::new("p1", 1, "Doc", vec![], Some(vec![Paragraph::plain("Body")]));
        let template = Template::new("Meeting", "Header\n<% tp.file.selection() %>\nFooter\n");

        assert_eq!(
            page_to_markdown(&page, Some(&template)).unwrap(),
            "Header\nBody\nFooter"
        );
    }
}
