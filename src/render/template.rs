//! Vault templates and template selection.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Marker replaced by the rendered Markdown.
pub const SELECTION_MARKER: &str = "<% tp.file.selection() %>";

/// A named template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Template name (file stem)
    pub name: String,

    /// Template text
    pub body: String,
}

impl Template {
    /// Create a template from its name and body.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    /// Check if the body contains the substitution marker.
    pub fn has_marker(&self) -> bool {
        self.body.contains(SELECTION_MARKER)
    }

    /// Substitute `markdown` for the first marker in the body.
    ///
    /// A body without a marker is returned as is and the Markdown is dropped.
    pub fn bind(&self, markdown: &str) -> String {
        if !self.has_marker() {
            log::warn!(
                "Template {} has no {} marker, rendered text is discarded",
                self.name,
                SELECTION_MARKER
            );
            return self.body.clone();
        }
        self.body.replacen(SELECTION_MARKER, markdown, 1)
    }
}

/// Outcome of matching candidate names against the known templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateMatch {
    /// No candidate names a template
    None,
    /// Exactly one template matched
    One(String),
    /// Several templates matched; none is used
    Ambiguous(Vec<String>),
}

impl TemplateMatch {
    /// The selected template name, if the match is unambiguous.
    pub fn selected(&self) -> Option<&str> {
        match self {
            TemplateMatch::One(name) => Some(name),
            TemplateMatch::None | TemplateMatch::Ambiguous(_) => None,
        }
    }
}

/// Intersect candidate names (tags, collection names) with the known templates.
pub fn select_template<'a, I>(candidates: I, known: &BTreeSet<String>) -> TemplateMatch
where
    I: IntoIterator<Item = &'a str>,
{
    let matches: BTreeSet<&str> = candidates
        .into_iter()
        .filter(|candidate| known.contains(*candidate))
        .collect();

    let mut matches: Vec<String> = matches.into_iter().map(str::to_string).collect();
    match matches.len() {
        0 => TemplateMatch::None,
        1 => TemplateMatch::One(matches.remove(0)),
        _ => TemplateMatch::Ambiguous(matches),
    }
}

/// Directory of `*.md` templates, each identified by its file stem.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Create a store over the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The template directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the available templates. A missing directory has none.
    pub fn names(&self) -> Result<BTreeSet<String>> {
        if !self.dir.is_dir() {
            log::debug!("Template directory {} does not exist", self.dir.display());
            return Ok(BTreeSet::new());
        }

        let mut names = BTreeSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names)
    }

    /// Load a template by name.
    pub fn load(&self, name: &str) -> Result<Template> {
        let path = self.dir.join(format!("{}.md", name));
        if !path.is_file() {
            return Err(Error::TemplateNotFound(name.to_string()));
        }
        let body = fs::read_to_string(&path)?;
        Ok(Template::new(name, body))
    }
}
