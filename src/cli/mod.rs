//! Command-line interface for minutecheck.
//!
//! Provides commands for checking a spreadsheet of claimed sentences against
//! a document, inspecting how a document is indexed, resolving a single
//! location reference, and showing the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::check::MarkerStyle;
use crate::config::{self, ResolvedConfig};
use crate::document::{self, DocumentIndex, IndexPolicy};
use crate::location::{ResolveMode, Resolver};
use crate::report::ReportFormat;

pub mod check;

/// minutecheck - verify spreadsheet sentences against paragraph-numbered minutes
#[derive(Parser, Debug)]
#[command(name = "minutecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that index a document
#[derive(clap::Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// How paragraphs are numbered
    #[arg(short, long, value_enum)]
    pub policy: Option<PolicyArg>,
}

/// Options shared by commands that resolve locations
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// How single-point references are resolved
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Neighborhood half-width in lines
    #[arg(short, long)]
    pub radius: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every row of a spreadsheet against a document
    Check {
        /// Document (.docx, or plain text with one paragraph per line)
        document: PathBuf,

        /// Spreadsheet (.xlsx, .xls or .ods)
        sheet: PathBuf,

        #[command(flatten)]
        index: IndexArgs,

        #[command(flatten)]
        resolve: ResolveArgs,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// How differences are marked
        #[arg(long, value_enum)]
        marker: Option<MarkerArg>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with status 1 if any row is not a match
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Print every addressable key of a document and its text
    Index {
        /// Document to index
        document: PathBuf,

        #[command(flatten)]
        index: IndexArgs,
    },

    /// Resolve one location reference against a document
    Resolve {
        /// Document to resolve against
        document: PathBuf,

        /// Location reference, e.g. "L5:T2", "L5:C" or "L3:T0 - L6:T0"
        reference: String,

        #[command(flatten)]
        index: IndexArgs,

        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Indexing policy for CLI (maps to IndexPolicy)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Blank paragraphs are not numbered
    Dense,
    /// Every paragraph is numbered
    Sparse,
    /// Paragraphs carry their own L<line>:T<tab>: label
    Labeled,
}

impl From<PolicyArg> for IndexPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Dense => IndexPolicy::Dense,
            PolicyArg::Sparse => IndexPolicy::Sparse,
            PolicyArg::Labeled => IndexPolicy::Labeled,
        }
    }
}

/// Resolution mode for CLI (maps to ResolveMode)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Points must exist exactly as written
    Exact,
    /// Points match any paragraph within the radius
    Neighborhood,
}

impl From<ModeArg> for ResolveMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Exact => ResolveMode::Exact,
            ModeArg::Neighborhood => ResolveMode::Neighborhood,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarkerArg {
    Html,
    Ansi,
    Brackets,
}

impl From<MarkerArg> for MarkerStyle {
    fn from(m: MarkerArg) -> Self {
        match m {
            MarkerArg::Html => MarkerStyle::Html,
            MarkerArg::Ansi => MarkerStyle::Ansi,
            MarkerArg::Brackets => MarkerStyle::Brackets,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Jsonl,
}

impl From<FormatArg> for ReportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Jsonl => ReportFormat::Jsonl,
        }
    }
}

impl IndexArgs {
    /// Apply flags on top of the resolved configuration
    pub fn apply(&self, config: &mut ResolvedConfig) {
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }
    }
}

impl ResolveArgs {
    /// Apply flags on top of the resolved configuration
    pub fn apply(&self, config: &mut ResolvedConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check {
                document,
                sheet,
                index,
                resolve,
                format,
                marker,
                output,
                fail_on_mismatch,
            } => {
                let mut config = config::config()?.clone();
                index.apply(&mut config);
                resolve.apply(&mut config);
                if let Some(format) = format {
                    config.format = format.into();
                }
                if let Some(marker) = marker {
                    config.marker = marker.into();
                }
                check::execute_check(&document, &sheet, &config, output.as_deref(), fail_on_mismatch)
                    .await
            }
            Commands::Index { document, index } => {
                let mut config = config::config()?.clone();
                index.apply(&mut config);
                show_index(&document, config.policy).await
            }
            Commands::Resolve {
                document,
                reference,
                index,
                resolve,
            } => {
                let mut config = config::config()?.clone();
                index.apply(&mut config);
                resolve.apply(&mut config);
                resolve_reference(&document, &reference, &config).await
            }
            Commands::Config => show_config().await,
        }
    }
}

/// Load and index a document
pub async fn load_index(path: &Path, policy: IndexPolicy) -> Result<DocumentIndex> {
    let paragraphs = document::load_document(path)
        .await
        .with_context(|| format!("Failed to load document: {}", path.display()))?;
    Ok(DocumentIndex::build(paragraphs, policy))
}

/// Print every key of a document
async fn show_index(path: &Path, policy: IndexPolicy) -> Result<()> {
    let index = load_index(path, policy).await?;

    if index.is_empty() {
        println!("No addressable paragraphs found");
        return Ok(());
    }

    println!("{:<12} {}", "KEY", "TEXT");
    println!("{}", "-".repeat(75));

    for (key, text) in index.entries() {
        println!("{:<12} {}", key.to_string(), text);
    }

    println!();
    println!("{} paragraphs ({} policy)", index.len(), index.policy());

    Ok(())
}

/// Print the keys and texts a reference resolves to
async fn resolve_reference(path: &Path, reference: &str, config: &ResolvedConfig) -> Result<()> {
    let index = load_index(path, config.policy).await?;
    let resolver = Resolver::new(&index).with_mode(config.mode, config.radius);

    let keys = resolver
        .resolve_str(reference)
        .with_context(|| format!("Invalid location reference: {}", reference))?;

    if keys.is_empty() {
        println!("`{}` does not resolve to any paragraph", reference);
        return Ok(());
    }

    for key in keys {
        println!("{:<12} {}", key.to_string(), index.text(&key).unwrap_or_default());
    }

    Ok(())
}

/// Show resolved configuration
async fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Configuration:");
    match &config.config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (none, using defaults)"),
    }
    println!("  Policy:      {}", config.policy);
    println!("  Mode:        {}", config.mode);
    println!("  Radius:      {}", config.radius);
    println!(
        "  Columns:     sentence={}, location={}, header_rows={}",
        crate::sheet::column_letter(config.columns.sentence),
        crate::sheet::column_letter(config.columns.location),
        config.columns.header_rows
    );
    println!("  Null cells:  {}", config.null_markers.join(", "));
    println!("  Marker:      {}", config.marker);
    println!("  Format:      {}", config.format);

    Ok(())
}
