//! Row-by-row verification of spreadsheet claims against a document.
//!
//! Each row is independent: resolve its location, look for the sentence in
//! the located text, and highlight the difference when it is not there.
//! Per-row problems become a [`CheckStatus`]; nothing here returns an error
//! for a single bad row.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::highlight::{highlight, render, MarkerStyle};
use super::matcher::evaluate;
use crate::document::DocumentIndex;
use crate::domain::{CheckRow, CheckStatus, UnresolvedReason};
use crate::location::{LocationError, ResolveMode, Resolver, DEFAULT_RADIUS};
use crate::sheet::{ColumnLayout, Sheet, SheetError};

/// Cell values treated as blank, compared case-insensitively
pub fn default_null_markers() -> Vec<String> {
    vec!["nan".to_string(), "none".to_string(), "null".to_string()]
}

/// Whether a cell is empty or holds a null marker
pub fn is_blank_cell(value: &str, null_markers: &[String]) -> bool {
    let value = value.trim();
    value.is_empty() || null_markers.iter().any(|m| m.eq_ignore_ascii_case(value))
}

/// Settings for a checking run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOptions {
    pub mode: ResolveMode,
    pub radius: u32,
    pub marker: MarkerStyle,
    pub null_markers: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            mode: ResolveMode::Exact,
            radius: DEFAULT_RADIUS,
            marker: MarkerStyle::default(),
            null_markers: default_null_markers(),
        }
    }
}

/// Aggregate counts over a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub unresolved: usize,
}

impl Summary {
    pub fn from_rows(rows: &[CheckRow]) -> Self {
        let mut summary = Summary {
            total: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match row.status {
                CheckStatus::Match => summary.matched += 1,
                CheckStatus::Mismatch => summary.mismatched += 1,
                CheckStatus::UnresolvedLocation => summary.unresolved += 1,
            }
        }
        summary
    }

    /// Whether every checked row matched
    pub fn all_matched(&self) -> bool {
        self.matched == self.total
    }
}

/// Checks rows against one read-only document index
pub struct RowChecker<'a> {
    index: &'a DocumentIndex,
    resolver: Resolver<'a>,
    options: CheckOptions,
}

impl<'a> RowChecker<'a> {
    pub fn new(index: &'a DocumentIndex, options: CheckOptions) -> Self {
        let resolver = Resolver::new(index).with_mode(options.mode, options.radius);
        Self {
            index,
            resolver,
            options,
        }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Check one row; `None` when either field is blank
    pub fn check_row(&self, row: usize, sentence: &str, location: &str) -> Option<CheckRow> {
        if is_blank_cell(sentence, &self.options.null_markers)
            || is_blank_cell(location, &self.options.null_markers)
        {
            debug!(row, "Skipping blank row");
            return None;
        }

        let sentence = sentence.trim().to_string();
        let location = location.trim().to_string();

        let keys = match self.resolver.resolve_str(&location) {
            Ok(keys) if keys.is_empty() => {
                debug!(row, location = %location, "Location not found");
                return Some(CheckRow::unresolved(
                    row,
                    location,
                    sentence,
                    UnresolvedReason::NotFound,
                ));
            }
            Ok(keys) => keys,
            Err(LocationError::Empty) => return None,
            Err(e) => {
                debug!(row, error = %e, "Malformed location");
                return Some(CheckRow::unresolved(
                    row,
                    location,
                    sentence,
                    UnresolvedReason::Malformed,
                ));
            }
        };

        let blocks = self.index.texts_for(&keys);
        let outcome = evaluate(&sentence, &blocks);

        if outcome.is_match() {
            debug!(row, location = %location, "Sentence found");
            return Some(CheckRow::matched(row, location, sentence, keys));
        }

        let highlighted = render(&highlight(&sentence, &outcome.combined), self.options.marker);
        debug!(row, location = %location, "Sentence differs from document");
        Some(CheckRow::mismatched(
            row,
            location,
            sentence,
            keys,
            highlighted,
            outcome.combined,
        ))
    }

    /// Check `(sentence, location)` pairs in order
    ///
    /// Reported row numbers are the zero-based iteration index plus
    /// `row_offset`, so skipped rows never shift later numbers.
    pub fn check_rows<I, A, B>(&self, rows: I, row_offset: usize) -> Vec<CheckRow>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let results: Vec<CheckRow> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(i, (sentence, location))| {
                self.check_row(i + row_offset, sentence.as_ref(), location.as_ref())
            })
            .collect();

        let summary = Summary::from_rows(&results);
        info!(
            checked = summary.total,
            matched = summary.matched,
            mismatched = summary.mismatched,
            unresolved = summary.unresolved,
            "Checked rows"
        );

        results
    }

    /// Check every data row of a sheet using `layout` to find the columns
    ///
    /// A sheet narrower than the layout requires fails the whole batch.
    pub fn check_sheet(&self, sheet: &Sheet, layout: &ColumnLayout) -> Result<Vec<CheckRow>, SheetError> {
        sheet.require_columns(layout)?;

        let rows = sheet
            .rows
            .iter()
            .skip(layout.header_rows)
            .map(|row| (row.cell(layout.sentence), row.cell(layout.location)));

        Ok(self.check_rows(rows, layout.first_data_row()))
    }
}
