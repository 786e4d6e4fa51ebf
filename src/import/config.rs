//! Import configuration.

use std::path::PathBuf;

use super::state::{DEFAULT_IMPORTED_TAG, DEFAULT_IMPORT_TAG};

/// Options controlling an import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Notebook catalog directory
    pub catalog_dir: PathBuf,

    /// Vault root directory
    pub vault_dir: PathBuf,

    /// Sub-directory of the vault receiving imported notes
    pub ingest_dir: String,

    /// Sub-directory of the vault holding templates
    pub template_dir: String,

    /// Display name of the vault
    pub vault_name: String,

    /// Overwrite notes that already exist in the vault
    pub overwrite: bool,

    /// Import without asking for confirmation
    pub import_all: bool,

    /// Tag marking a unit as pending import
    pub import_tag: String,

    /// Tag a unit receives once imported
    pub imported_tag: String,

    /// Let ancestor collection names select templates too
    pub collection_templates: bool,
}

impl ImportConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog directory.
    pub fn with_catalog_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.catalog_dir = dir.into();
        self
    }

    /// Set the vault directory.
    pub fn with_vault_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vault_dir = dir.into();
        self
    }

    /// Set the ingest sub-directory name.
    pub fn with_ingest_dir(mut self, name: impl Into<String>) -> Self {
        self.ingest_dir = name.into();
        self
    }

    /// Set the template sub-directory name.
    pub fn with_template_dir(mut self, name: impl Into<String>) -> Self {
        self.template_dir = name.into();
        self
    }

    /// Set the vault display name.
    pub fn with_vault_name(mut self, name: impl Into<String>) -> Self {
        self.vault_name = name.into();
        self
    }

    /// Enable or disable overwriting existing notes.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Enable or disable the confirmation prompt bypass.
    pub fn with_import_all(mut self, import_all: bool) -> Self {
        self.import_all = import_all;
        self
    }

    /// Set the pending and imported tag names.
    pub fn with_tags(mut self, import: impl Into<String>, imported: impl Into<String>) -> Self {
        self.import_tag = import.into();
        self.imported_tag = imported.into();
        self
    }

    /// Enable or disable template matching on collection names.
    pub fn with_collection_templates(mut self, enabled: bool) -> Self {
        self.collection_templates = enabled;
        self
    }

    /// Directory receiving imported notes.
    pub fn ingest_path(&self) -> PathBuf {
        self.vault_dir.join(&self.ingest_dir)
    }

    /// Directory holding templates.
    pub fn template_path(&self) -> PathBuf {
        self.vault_dir.join(&self.template_dir)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("app/remarkables"),
            vault_dir: PathBuf::from("app/vault"),
            ingest_dir: "99 - Ingest".to_string(),
            template_dir: "91 - Templates".to_string(),
            vault_name: "MyVault".to_string(),
            overwrite: false,
            import_all: false,
            import_tag: DEFAULT_IMPORT_TAG.to_string(),
            imported_tag: DEFAULT_IMPORTED_TAG.to_string(),
            collection_templates: false,
        }
    }
}

/// Parse an environment-style boolean (`true`, `1`, `t`, `y`, `yes`).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "t" | "y" | "yes"
    )
}
