//! rmdown CLI - notebook to Obsidian importer

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;

use rmdown::import::{parse_flag, Candidate};
use rmdown::{Confirm, ImportConfig, ImportReport, Importer, JsonSceneDecoder};

#[derive(Parser)]
#[command(name = "rmdown")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Import tagged notebook text into an Obsidian vault", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct Settings {
    /// Notebook catalog directory
    #[arg(
        long,
        env = "REMARKABLE_DIRECTORY",
        default_value = "app/remarkables",
        global = true
    )]
    catalog: PathBuf,

    /// Vault root directory
    #[arg(long, env = "VAULT_DIRECTORY", default_value = "app/vault", global = true)]
    vault: PathBuf,

    /// Vault display name
    #[arg(long, env = "VAULT_NAME", default_value = "MyVault", global = true)]
    vault_name: String,

    /// Vault sub-directory receiving imported notes
    #[arg(long, env = "INGEST_DIRECTORY", default_value = "99 - Ingest", global = true)]
    ingest: String,

    /// Vault sub-directory holding templates
    #[arg(
        long,
        env = "TEMPLATE_DIRECTORY",
        default_value = "91 - Templates",
        global = true
    )]
    templates: String,

    /// Overwrite notes that already exist
    #[arg(
        long,
        env = "OVERWRITE",
        value_name = "BOOL",
        action = ArgAction::Set,
        value_parser = parse_bool,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        global = true
    )]
    overwrite: bool,

    /// Import every tagged document without asking
    #[arg(
        long,
        env = "IMPORT_ALL",
        value_name = "BOOL",
        action = ArgAction::Set,
        value_parser = parse_bool,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        global = true
    )]
    import_all: bool,

    /// Also select templates by parent collection names
    #[arg(long, global = true)]
    collection_templates: bool,
}

impl Settings {
    fn to_config(&self) -> ImportConfig {
        ImportConfig::new()
            .with_catalog_dir(&self.catalog)
            .with_vault_dir(&self.vault)
            .with_vault_name(&self.vault_name)
            .with_ingest_dir(&self.ingest)
            .with_template_dir(&self.templates)
            .with_overwrite(self.overwrite)
            .with_import_all(self.import_all)
            .with_collection_templates(self.collection_templates)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Import tagged documents and pages into the vault (default)
    Import,

    /// List documents tagged for import
    Scan,

    /// Render a document to Markdown without importing it
    Render {
        /// Document id
        #[arg(value_name = "ID")]
        id: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List the templates available in the vault
    Templates,

    /// Show version information
    Version,
}

/// Strict boolean parser for flag values and their environment fallbacks.
fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "0" | "f" | "n" | "no" => Ok(false),
        other if parse_flag(other) => Ok(true),
        other => Err(format!("expected a boolean, got `{}`", other)),
    }
}

/// Asks on the terminal before each document.
struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&mut self, name: &str) -> rmdown::Result<bool> {
        print!("Do you want to process \"{}\" ? ([y]/n) ", name);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim() != "n")
    }
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.settings.to_config();

    let result = match cli.command {
        Some(Commands::Import) | None => cmd_import(config),
        Some(Commands::Scan) => cmd_scan(config),
        Some(Commands::Render { id, output }) => cmd_render(config, &id, output.as_deref()),
        Some(Commands::Templates) => cmd_templates(config),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_import(config: ImportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let vault_name = config.vault_name.clone();
    let mut importer = Importer::new(config, JsonSceneDecoder::new());
    let report = importer.run(&mut PromptConfirm)?;
    print_report(&vault_name, &report);
    Ok(())
}

fn print_report(vault_name: &str, report: &ImportReport) {
    println!();
    if report.imported.is_empty() {
        println!("{}", "Nothing imported".yellow());
    } else {
        println!("{} {}", "Imported into".green().bold(), vault_name.bold());
        for (i, unit) in report.imported.iter().enumerate() {
            let branch = if i + 1 == report.imported.len() {
                "└─"
            } else {
                "├─"
            };
            let template = unit
                .template
                .as_deref()
                .map(|t| format!(" [{}]", t))
                .unwrap_or_default();
            println!("  {} {}{}", branch.dimmed(), unit.name, template.dimmed());
        }
    }

    print_names("Already in vault", &report.skipped_existing);
    print_names("Without text", &report.empty);
    print_names("Declined", &report.declined);
    print_names("Ignored", &report.ignored);
    if !report.failed.is_empty() {
        println!("{}: {}", "Failed".red().bold(), report.failed.join(", "));
    }
}

fn print_names(label: &str, names: &[String]) {
    if !names.is_empty() {
        println!("{}: {}", label.bold(), names.join(", "));
    }
}

fn cmd_scan(config: ImportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let importer = Importer::new(config, JsonSceneDecoder::new());
    let candidates = importer.candidates()?;

    println!("{}", "Tagged documents".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for Candidate { id, name } in &candidates {
        println!("{} {}", name.bold(), id.dimmed());
    }
    println!("\n{} document(s)", candidates.len());
    Ok(())
}

fn cmd_render(
    config: ImportConfig,
    id: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut importer = Importer::new(config, JsonSceneDecoder::new());
    let Some(markdown) = importer.render_document(id)? else {
        println!("{}", "No text found".yellow());
        return Ok(());
    };

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }
    Ok(())
}

fn cmd_templates(config: ImportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let importer = Importer::new(config, JsonSceneDecoder::new());
    let store = importer.templates();

    println!("{} {}", "Templates in".cyan().bold(), store.dir().display());
    println!("{}", "─".repeat(40).dimmed());
    for name in store.names()? {
        let marker = match store.load(&name) {
            Ok(template) if template.has_marker() => "",
            Ok(_) => " (no selection marker)",
            Err(_) => " (unreadable)",
        };
        println!("{}{}", name.bold(), marker.yellow());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "rmdown".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notebook to Obsidian importer");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/rmdown".dimmed());
    println!("License: MIT");
}
