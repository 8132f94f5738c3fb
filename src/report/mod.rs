//! Check reports and their output formats.
//!
//! A report ties a batch of [`CheckRow`]s to the exact document it was
//! produced from via a SHA256 digest of the document bytes.
//!
//! # Formats
//!
//! - **text**: one block per row, for reading in a terminal
//! - **json**: the whole report as one pretty-printed document
//! - **jsonl**: a header line, then one line per row

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::check::Summary;
use crate::document::IndexPolicy;
use crate::domain::{CheckRow, CheckStatus};
use crate::location::ResolveMode;

/// Compute SHA256 of a byte slice as `sha256:<hex>`
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Jsonl,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Jsonl => "jsonl",
        })
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "jsonl" => Ok(ReportFormat::Jsonl),
            other => Err(format!(
                "unknown report format '{}' (expected text, json or jsonl)",
                other
            )),
        }
    }
}

/// Everything but the rows; the first line of a jsonl report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportHeader {
    pub run_id: Uuid,
    pub checked_at: DateTime<Utc>,
    /// Document path as given
    pub document: String,
    pub document_sha256: String,
    /// Spreadsheet path as given
    pub sheet: String,
    pub policy: IndexPolicy,
    pub mode: ResolveMode,
    pub summary: Summary,
}

/// Result of one checking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub rows: Vec<CheckRow>,
}

impl CheckReport {
    pub fn new(
        document: impl Into<String>,
        document_bytes: &[u8],
        sheet: impl Into<String>,
        policy: IndexPolicy,
        mode: ResolveMode,
        rows: Vec<CheckRow>,
    ) -> Self {
        Self {
            header: ReportHeader {
                run_id: Uuid::new_v4(),
                checked_at: Utc::now(),
                document: document.into(),
                document_sha256: compute_hash(document_bytes),
                sheet: sheet.into(),
                policy,
                mode,
                summary: Summary::from_rows(&rows),
            },
            rows,
        }
    }

    pub fn summary(&self) -> Summary {
        self.header.summary
    }

    /// Render the report in `format`
    pub fn render(&self, format: ReportFormat) -> serde_json::Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => serde_json::to_string_pretty(self),
            ReportFormat::Jsonl => {
                let mut out = serde_json::to_string(&self.header)?;
                out.push('\n');
                for row in &self.rows {
                    out.push_str(&serde_json::to_string(row)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let header = &self.header;

        let _ = writeln!(out, "Document: {} ({})", header.document, header.document_sha256);
        let _ = writeln!(out, "Sheet:    {}", header.sheet);
        let _ = writeln!(out, "Policy:   {} / {}", header.policy, header.mode);

        for row in &self.rows {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Row {} | Location: {} | Status: {}",
                row.row,
                row.location,
                row.status.label()
            );
            let _ = writeln!(out, "  Sentence to check:");
            let _ = writeln!(out, "    > {}", row.sentence);
            let _ = writeln!(out, "  Details: {}", row.detail);

            if row.status == CheckStatus::Mismatch {
                if let Some(highlighted) = &row.highlighted {
                    let _ = writeln!(out, "  Highlighted differences:");
                    let _ = writeln!(out, "    {}", highlighted);
                }
                if let Some(text) = &row.located_text {
                    let _ = writeln!(out, "  Original text from document:");
                    let _ = writeln!(out, "    > {}", text);
                }
            }
        }

        let summary = &header.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary:");
        let _ = writeln!(out, "  Checked:    {}", summary.total);
        let _ = writeln!(out, "  Correct:    {}", summary.matched);
        let _ = writeln!(out, "  Incorrect:  {}", summary.mismatched);
        let _ = writeln!(out, "  Unresolved: {}", summary.unresolved);

        out
    }
}
