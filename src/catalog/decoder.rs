//! Scene decoder abstraction.
//!
//! Turning a device scene file into paragraphs is delegated to a
//! [`SceneDecoder`]. The bundled [`JsonSceneDecoder`] reads the text layer
//! from a JSON export stored next to each scene file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Paragraph, ParagraphStyle, TextRun};

/// Source of the parsed text layer of a page.
pub trait SceneDecoder {
    /// Decode the text layer of the scene file at `scene`.
    ///
    /// Returns `Ok(None)` for pages without a text layer.
    fn decode(&self, scene: &Path) -> Result<Option<Vec<Paragraph>>>;
}

impl<F> SceneDecoder for F
where
    F: Fn(&Path) -> Result<Option<Vec<Paragraph>>>,
{
    fn decode(&self, scene: &Path) -> Result<Option<Vec<Paragraph>>> {
        self(scene)
    }
}

/// Decoder reading `<page-id>.json` text-layer exports.
///
/// The export is a JSON array of `{"style": <code>, "runs": [...]}` objects,
/// or `null` for a page without text. A missing export means no text layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSceneDecoder;

impl JsonSceneDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Path of the export belonging to a scene file.
    pub fn export_path(scene: &Path) -> PathBuf {
        scene.with_extension("json")
    }

    /// Parse an export document.
    pub fn parse(data: &str) -> Result<Option<Vec<Paragraph>>> {
        let raw: Option<Vec<RawParagraph>> =
            serde_json::from_str(data).map_err(|e| Error::Decode(e.to_string()))?;

        raw.map(|paragraphs| {
            paragraphs
                .into_iter()
                .map(Paragraph::try_from)
                .collect::<Result<Vec<_>>>()
        })
        .transpose()
    }
}

impl SceneDecoder for JsonSceneDecoder {
    fn decode(&self, scene: &Path) -> Result<Option<Vec<Paragraph>>> {
        let path = Self::export_path(scene);
        if !path.is_file() {
            log::debug!("No text layer for {}", scene.display());
            return Ok(None);
        }

        let data = fs::read_to_string(&path)?;
        Self::parse(&data).map_err(|e| match e {
            Error::Decode(msg) => Error::Decode(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }
}

/// Paragraph as exported, with the raw style code.
#[derive(Debug, Deserialize)]
struct RawParagraph {
    style: u32,
    #[serde(default)]
    runs: Vec<TextRun>,
}

impl TryFrom<RawParagraph> for Paragraph {
    type Error = Error;

    fn try_from(raw: RawParagraph) -> Result<Self> {
        Ok(Paragraph {
            style: ParagraphStyle::try_from(raw.style)?,
            runs: raw.runs,
        })
    }
}
