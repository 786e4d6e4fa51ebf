//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A paragraph of text content, as produced by the scene decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph style
    pub style: ParagraphStyle,

    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph with the given style.
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            runs: Vec::new(),
        }
    }

    /// Create a paragraph holding a single unstyled run.
    pub fn with_text(style: ParagraphStyle, text: impl Into<String>) -> Self {
        let mut p = Self::new(style);
        p.add_run(TextRun::new(text));
        p
    }

    /// Create a plain paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::with_text(ParagraphStyle::Plain, text)
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>) -> Self {
        Self::with_text(ParagraphStyle::Heading, text)
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Builder-style variant of [`Paragraph::add_run`].
    pub fn run(mut self, run: TextRun) -> Self {
        self.add_run(run);
        self
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Text of the first run, if any.
    pub fn first_run_text(&self) -> Option<&str> {
        self.runs.first().map(|run| run.text.as_str())
    }
}

/// Paragraph styles understood by the renderer.
///
/// Discriminants are the device style codes. Declaration order is significant:
/// `Plain < Heading < Bold < Bullet < Bullet2 < CheckboxEmpty < CheckboxChecked`,
/// and the last four form the list range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum ParagraphStyle {
    /// Running prose
    #[default]
    Plain = 1,
    /// Section heading
    Heading = 2,
    /// Bold sub-heading
    Bold = 3,
    /// First-level bullet
    Bullet = 4,
    /// Second-level bullet
    Bullet2 = 5,
    /// Unchecked checkbox
    CheckboxEmpty = 6,
    /// Checked checkbox
    CheckboxChecked = 7,
}

impl ParagraphStyle {
    /// Every supported style, in ordinal order.
    pub const ALL: [ParagraphStyle; 7] = [
        ParagraphStyle::Plain,
        ParagraphStyle::Heading,
        ParagraphStyle::Bold,
        ParagraphStyle::Bullet,
        ParagraphStyle::Bullet2,
        ParagraphStyle::CheckboxEmpty,
        ParagraphStyle::CheckboxChecked,
    ];

    /// Device style code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Whether this style is a list item (bullets and checkboxes).
    pub fn is_list_style(self) -> bool {
        matches!(
            self,
            ParagraphStyle::Bullet
                | ParagraphStyle::Bullet2
                | ParagraphStyle::CheckboxEmpty
                | ParagraphStyle::CheckboxChecked
        )
    }

    /// Whether this style gets an extra blank line after it.
    pub fn is_heading_like(self) -> bool {
        matches!(self, ParagraphStyle::Heading | ParagraphStyle::Bold)
    }
}

impl TryFrom<u32> for ParagraphStyle {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        ParagraphStyle::ALL
            .into_iter()
            .find(|style| style.code() == code)
            .ok_or(Error::UnsupportedStyle(code))
    }
}

impl From<ParagraphStyle> for u32 {
    fn from(style: ParagraphStyle) -> Self {
        style.code()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Font properties
    #[serde(default)]
    pub properties: RunProperties,
}

impl TextRun {
    /// Create a new text run with default properties.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: RunProperties::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_weight(FontWeight::Bold)
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text).with_style(FontStyle::Italic)
    }

    /// Set the font weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.properties.font_weight = weight;
        self
    }

    /// Set the font style.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.properties.font_style = style;
        self
    }
}

/// Font property map attached to a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProperties {
    /// Font weight
    #[serde(rename = "font-weight", default)]
    pub font_weight: FontWeight,

    /// Font style
    #[serde(rename = "font-style", default)]
    pub font_style: FontStyle,
}

impl RunProperties {
    /// Check if the run is bold.
    pub fn is_bold(&self) -> bool {
        self.font_weight == FontWeight::Bold
    }

    /// Check if the run is italic.
    pub fn is_italic(&self) -> bool {
        self.font_style == FontStyle::Italic
    }
}

/// Font weight of a run. Unknown weights read as normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Bold,
    #[default]
    #[serde(other)]
    Normal,
}

/// Font style of a run. Unknown styles read as normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Italic,
    #[default]
    #[serde(other)]
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let p = Paragraph::plain("Hello ")
            .run(TextRun::bold("world"))
            .run(TextRun::new("!"));

        assert_eq!(p.plain_text(), "Hello world!");
        assert_eq!(p.first_run_text(), Some("Hello "));
    }

    #[test]
    fn test_style_codes() {
        for style in ParagraphStyle::ALL {
            assert_eq!(ParagraphStyle::try_from(style.code()).unwrap(), style);
        }
        assert!(matches!(
            ParagraphStyle::try_from(0),
            Err(Error::UnsupportedStyle(0))
        ));
        assert!(matches!(
            ParagraphStyle::try_from(8),
            Err(Error::UnsupportedStyle(8))
        ));
    }

    #[test]
    fn test_list_range_matches_ordering() {
        for style in ParagraphStyle::ALL {
            let in_range =
                ParagraphStyle::Bullet <= style && style <= ParagraphStyle::CheckboxChecked;
            assert_eq!(style.is_list_style(), in_range, "{:?}", style);
        }
        assert!(!ParagraphStyle::Plain.is_list_style());
        assert!(!ParagraphStyle::Bold.is_list_style());
    }

    #[test]
    fn test_run_properties_from_json() {
        let run: TextRun = serde_json::from_str(
            r#"{"text": "x", "properties": {"font-weight": "bold", "font-style": "italic"}}"#,
        )
        .unwrap();
        assert!(run.properties.is_bold());
        assert!(run.properties.is_italic());

        let run: TextRun = serde_json::from_str(
            r#"{"text": "y", "properties": {"font-weight": "500", "font-style": "oblique"}}"#,
        )
        .unwrap();
        assert_eq!(run.properties.font_weight, FontWeight::Normal);
        assert_eq!(run.properties.font_style, FontStyle::Normal);

        let run: TextRun = serde_json::from_str(r#"{"text": "z"}"#).unwrap();
        assert_eq!(run.properties, RunProperties::default());
    }

    #[test]
    fn test_style_serde_uses_codes() {
        let p = Paragraph::heading("Title");
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"style\":2"));

        let err = serde_json::from_str::<Paragraph>(r#"{"style": 0, "runs": []}"#);
        assert!(err.is_err());
    }
}
