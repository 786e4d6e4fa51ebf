//! Writing notes into the vault's ingest directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The note was written
    Written(PathBuf),
    /// The note already existed and overwriting is disabled
    SkippedExisting(PathBuf),
}

impl SaveOutcome {
    /// Check if the note was written.
    pub fn is_written(&self) -> bool {
        matches!(self, SaveOutcome::Written(_))
    }

    /// Path of the note.
    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Written(path) | SaveOutcome::SkippedExisting(path) => path,
        }
    }
}

/// Destination directory for imported notes.
#[derive(Debug, Clone)]
pub struct Vault {
    dir: PathBuf,
    overwrite: bool,
}

impl Vault {
    /// Create a vault writer over the ingest directory.
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    /// The ingest directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path of the note named `name`.
    pub fn note_path(&self, name: &str) -> PathBuf {
        let file_name = name.replace(['/', '\\'], " - ");
        self.dir.join(format!("{}.md", file_name.trim()))
    }

    /// Write a note, creating the ingest directory if needed.
    pub fn save(&self, name: &str, content: &str) -> Result<SaveOutcome> {
        fs::create_dir_all(&self.dir)?;
        let path = self.note_path(name);

        if path.exists() && !self.overwrite {
            log::info!("File {} already exists, skipping", path.display());
            return Ok(SaveOutcome::SkippedExisting(path));
        }

        fs::write(&path, content)?;
        log::debug!("Wrote {}", path.display());
        Ok(SaveOutcome::Written(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path().join("99 - Ingest"), false);

        let outcome = vault.save("Note", "body").unwrap();
        assert!(outcome.is_written());
        assert_eq!(fs::read_to_string(outcome.path()).unwrap(), "body");
    }

    #[test]
    fn test_existing_note_is_skipped_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path(), false);
        vault.save("Note", "first").unwrap();

        let outcome = vault.save("Note", "second").unwrap();
        assert!(matches!(outcome, SaveOutcome::SkippedExisting(_)));
        assert_eq!(fs::read_to_string(outcome.path()).unwrap(), "first");
    }

    #[test]
    fn test_existing_note_is_replaced_with_overwrite() {
        let dir = TempDir::new().unwrap();
        let vault = Vault::new(dir.path(), true);
        vault.save("Note", "first").unwrap();

        let outcome = vault.save("Note", "second").unwrap();
        assert!(outcome.is_written());
        assert_eq!(fs::read_to_string(outcome.path()).unwrap(), "second");
    }

    #[test]
    fn test_note_path_flattens_separators() {
        let vault = Vault::new("/vault", false);
        assert_eq!(
            vault.note_path("Work/Plans"),
            PathBuf::from("/vault/Work - Plans.md")
        );
    }
}
