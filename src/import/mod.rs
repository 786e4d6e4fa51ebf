//! Import pipeline: catalog → Markdown → vault, with tag bookkeeping.
//!
//! # Example
//!
//! ```no_run
//! use rmdown::import::{AlwaysConfirm, ImportConfig, Importer};
//! use rmdown::JsonSceneDecoder;
//!
//! fn main() -> rmdown::Result<()> {
//!     let config = ImportConfig::new()
//!         .with_catalog_dir("xochitl")
//!         .with_vault_dir("vault");
//!
//!     let mut importer = Importer::new(config, JsonSceneDecoder::new());
//!     let report = importer.run(&mut AlwaysConfirm)?;
//!     println!("{} note(s) imported", report.imported.len());
//!     Ok(())
//! }
//! ```

mod config;
mod state;
mod vault;

pub use config::{parse_flag, ImportConfig};
pub use state::{
    ImportState, ImportStateMachine, DEFAULT_IMPORTED_TAG, DEFAULT_IMPORT_TAG, IGNORE_SENTINEL,
    KEEP_SENTINEL,
};
pub use vault::{SaveOutcome, Vault};

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::catalog::{Catalog, CollectionRegistry, SceneDecoder};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::{select_template, MarkdownRenderer, Template, TemplateMatch, TemplateStore};

/// Asks whether a document should be processed.
pub trait Confirm {
    /// Return `true` to process the document named `name`.
    fn confirm(&mut self, name: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, name: &str) -> Result<bool> {
        self(name)
    }
}

/// Confirms every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _name: &str) -> Result<bool> {
        Ok(true)
    }
}

/// A note written to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedUnit {
    /// Unit display name
    pub name: String,
    /// Written file
    pub path: PathBuf,
    /// Template applied, if any
    pub template: Option<String>,
    /// Whether the unit's tag moved to the imported tag
    pub retagged: bool,
}

/// Summary of an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Notes written
    pub imported: Vec<ImportedUnit>,
    /// Units whose note already existed
    pub skipped_existing: Vec<String>,
    /// Units without any text
    pub empty: Vec<String>,
    /// Documents declined at the prompt
    pub declined: Vec<String>,
    /// Documents named with the ignore sentinel
    pub ignored: Vec<String>,
    /// Units whose selected template could not be loaded
    pub failed: Vec<String>,
}

impl ImportReport {
    /// Total number of units looked at.
    pub fn total(&self) -> usize {
        self.imported.len()
            + self.skipped_existing.len()
            + self.empty.len()
            + self.declined.len()
            + self.ignored.len()
            + self.failed.len()
    }
}

/// A document tagged for import, as listed by [`Importer::candidates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Document id
    pub id: String,
    /// Visible name
    pub name: String,
}

/// Drives an import run.
pub struct Importer<D> {
    config: ImportConfig,
    catalog: Catalog,
    vault: Vault,
    templates: TemplateStore,
    machine: ImportStateMachine,
    registry: CollectionRegistry,
    renderer: MarkdownRenderer,
    decoder: D,
}

impl<D: SceneDecoder> Importer<D> {
    /// Create an importer for the given configuration.
    pub fn new(config: ImportConfig, decoder: D) -> Self {
        Self {
            catalog: Catalog::new(&config.catalog_dir),
            vault: Vault::new(config.ingest_path(), config.overwrite),
            templates: TemplateStore::new(config.template_path()),
            machine: ImportStateMachine::new(&config.import_tag, &config.imported_tag),
            registry: CollectionRegistry::new(),
            renderer: MarkdownRenderer::new(),
            decoder,
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// The catalog being imported from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The template store.
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Documents carrying the import tag on the document or on a page.
    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        self.catalog
            .scan(Some(self.machine.import_tag()))?
            .into_iter()
            .map(|id| {
                let name = self.catalog.read_metadata(&id)?.visible_name;
                Ok(Candidate { id, name })
            })
            .collect()
    }

    /// Load a document from the catalog.
    pub fn load(&mut self, id: &str) -> Result<Document> {
        self.catalog
            .load_document(id, &self.decoder, &mut self.registry)
    }

    /// Render a whole document without saving it or touching its tags.
    pub fn render_document(&mut self, id: &str) -> Result<Option<String>> {
        let doc = self.load(id)?;
        Ok(self.renderer.render_document(&doc, None))
    }

    /// Import every tagged document.
    ///
    /// Errors other than a missing template abort the run; work already done on
    /// earlier documents (notes and tags) is kept.
    pub fn run<C>(&mut self, confirm: &mut C) -> Result<ImportReport>
    where
        C: Confirm + ?Sized,
    {
        let mut report = ImportReport::default();
        let known_templates = self.templates.names()?;
        let ids = self.catalog.scan(Some(self.machine.import_tag()))?;
        log::info!("{} candidate document(s)", ids.len());

        for id in ids {
            let mut doc = self.load(&id)?;

            if doc.name == IGNORE_SENTINEL {
                log::debug!("Ignoring {}", doc.id);
                report.ignored.push(doc.name);
                continue;
            }

            if !self.config.import_all && !confirm.confirm(&doc.name)? {
                report.declined.push(doc.name);
                continue;
            }

            self.import_document(&mut doc, &known_templates, &mut report)?;
        }

        Ok(report)
    }

    /// Import one loaded document, as a whole or page by page.
    ///
    /// A document tagged for import is never also imported page by page.
    pub fn import_document(
        &mut self,
        doc: &mut Document,
        known_templates: &BTreeSet<String>,
        report: &mut ImportReport,
    ) -> Result<()> {
        if self.machine.document_state(doc) == ImportState::Pending {
            self.import_whole(doc, known_templates, report)
        } else {
            self.import_pages(doc, known_templates, report)
        }
    }

    fn import_whole(
        &mut self,
        doc: &mut Document,
        known_templates: &BTreeSet<String>,
        report: &mut ImportReport,
    ) -> Result<()> {
        log::info!("Processing {}", doc.name);

        // Document tags never select a template; collection names do when enabled.
        let candidates = self.collection_names(doc)?;
        let template = match self.choose_template(&doc.name, &candidates, known_templates) {
            Ok(template) => template,
            Err(Error::TemplateNotFound(name)) => {
                log::error!("Template {} for {} not found", name, doc.name);
                report.failed.push(doc.name.clone());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let Some(markdown) = self.renderer.render_document(doc, template.as_ref()) else {
            log::warn!("No text found in {}, skipping", doc.name);
            report.empty.push(doc.name.clone());
            return Ok(());
        };
        log::debug!("{}", markdown);

        let outcome = self.vault.save(&doc.name, &markdown)?;
        let retagged = self.machine.complete_document(doc, &outcome);
        self.finish(doc, outcome, template, retagged, doc.name.clone(), report)
    }

    fn import_pages(
        &mut self,
        doc: &mut Document,
        known_templates: &BTreeSet<String>,
        report: &mut ImportReport,
    ) -> Result<()> {
        let collections = self.collection_names(doc)?;

        for index in 0..doc.pages.len() {
            let page = &doc.pages[index];
            if self.machine.page_state(page) != ImportState::Pending {
                continue;
            }
            log::info!("Processing page {} of {}", page.number, doc.name);

            let name = page.name.clone();
            let mut candidates = page.tags.clone();
            candidates.extend(collections.iter().cloned());

            let template = match self.choose_template(&name, &candidates, known_templates) {
                Ok(template) => template,
                Err(Error::TemplateNotFound(template)) => {
                    log::error!("Template {} for {} not found", template, name);
                    report.failed.push(name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(markdown) = self.renderer.render_page(page, template.as_ref()) else {
                log::debug!("No text found for {}, skipping", name);
                report.empty.push(name);
                continue;
            };
            log::debug!("{}", markdown);

            let outcome = self.vault.save(&name, &markdown)?;
            let retagged = self.machine.complete_page(doc, index, &outcome);
            self.finish(doc, outcome, template, retagged, name, report)?;
        }
        Ok(())
    }

    /// Record the outcome and persist tags that changed.
    fn finish(
        &self,
        doc: &Document,
        outcome: SaveOutcome,
        template: Option<Template>,
        retagged: bool,
        name: String,
        report: &mut ImportReport,
    ) -> Result<()> {
        if retagged {
            self.catalog.save_content(doc)?;
            log::info!("Tagged {} as {}", name, self.machine.imported_tag());
        }

        match outcome {
            SaveOutcome::Written(path) => report.imported.push(ImportedUnit {
                name,
                path,
                template: template.map(|t| t.name),
                retagged,
            }),
            SaveOutcome::SkippedExisting(_) => report.skipped_existing.push(name),
        }
        Ok(())
    }

    /// Ancestor collection names, when they take part in template selection.
    fn collection_names(&mut self, doc: &Document) -> Result<Vec<String>> {
        if !self.config.collection_templates {
            return Ok(Vec::new());
        }
        self.registry
            .ancestors(&self.catalog, doc.parent.as_deref())
    }

    fn choose_template(
        &self,
        unit: &str,
        candidates: &[String],
        known_templates: &BTreeSet<String>,
    ) -> Result<Option<Template>> {
        match select_template(candidates.iter().map(String::as_str), known_templates) {
            TemplateMatch::None => Ok(None),
            TemplateMatch::One(name) => {
                log::debug!("Using template {} for {}", name, unit);
                self.templates.load(&name).map(Some)
            }
            TemplateMatch::Ambiguous(names) => {
                log::warn!(
                    "Multiple templates found for {} ({}), not using any template",
                    unit,
                    names.join(", ")
                );
                Ok(None)
            }
        }
    }
}
