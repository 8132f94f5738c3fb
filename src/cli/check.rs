//! The `check` command: run a whole spreadsheet against a document.
//!
//! Any problem reading either input aborts before a single row is checked;
//! per-row problems only show up as row statuses in the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::check::RowChecker;
use crate::config::ResolvedConfig;
use crate::document::{self, DocumentFormat, DocumentIndex};
use crate::report::CheckReport;
use crate::sheet;

/// Build the report for a document and spreadsheet on disk
pub async fn run_check(document_path: &Path, sheet_path: &Path, config: &ResolvedConfig) -> Result<CheckReport> {
    let bytes = tokio::fs::read(document_path)
        .await
        .with_context(|| format!("Failed to read document: {}", document_path.display()))?;

    let paragraphs = document::extract_paragraphs(&bytes, DocumentFormat::from_path(document_path))
        .with_context(|| format!("Failed to parse document: {}", document_path.display()))?;
    let index = DocumentIndex::build(paragraphs, config.policy);

    info!(
        document = %document_path.display(),
        policy = %config.policy,
        paragraphs = index.len(),
        "Indexed document"
    );

    let owned_path: PathBuf = sheet_path.to_path_buf();
    let sheet = tokio::task::spawn_blocking(move || sheet::load_sheet(&owned_path))
        .await
        .context("Spreadsheet loader panicked")?
        .with_context(|| format!("Failed to load spreadsheet: {}", sheet_path.display()))?;

    let checker = RowChecker::new(&index, config.check_options());
    let rows = checker
        .check_sheet(&sheet, &config.columns)
        .with_context(|| format!("Cannot check spreadsheet: {}", sheet_path.display()))?;

    Ok(CheckReport::new(
        document_path.display().to_string(),
        &bytes,
        sheet_path.display().to_string(),
        config.policy,
        config.mode,
        rows,
    ))
}

/// Execute the `check` command
pub async fn execute_check(
    document_path: &Path,
    sheet_path: &Path,
    config: &ResolvedConfig,
    output: Option<&Path>,
    fail_on_mismatch: bool,
) -> Result<()> {
    let report = run_check(document_path, sheet_path, config).await?;
    let rendered = report
        .render(config.format)
        .context("Failed to render report")?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &rendered)
                .await
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    let summary = report.summary();
    info!(
        run_id = %report.header.run_id,
        checked = summary.total,
        matched = summary.matched,
        "Check finished"
    );

    if fail_on_mismatch && !summary.all_matched() {
        eprintln!(
            "\n[{} of {} rows did not match]",
            summary.total - summary.matched,
            summary.total
        );
        std::process::exit(1);
    }

    Ok(())
}
