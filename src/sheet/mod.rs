//! Tabular input: the spreadsheet of claimed sentences.
//!
//! Only the first worksheet is read. Every cell is rendered to its display
//! string; the checker decides which columns matter via [`ColumnLayout`].

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors reading a spreadsheet. All of them abort the batch.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to open spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Spreadsheet has no worksheets")]
    NoWorksheet,

    #[error(
        "Missing expected columns in spreadsheet: need at least {required} columns \
         (sentence in column {sentence_col}, location in column {location_col}), found {found}"
    )]
    MissingColumns {
        required: usize,
        found: usize,
        sentence_col: String,
        location_col: String,
    },
}

/// Where the checker finds its fields, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Column holding the claimed sentence (default D)
    #[serde(default = "default_sentence_column")]
    pub sentence: usize,

    /// Column holding the location reference (default F)
    #[serde(default = "default_location_column")]
    pub location: usize,

    /// Leading rows that are headers, not data
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
}

fn default_sentence_column() -> usize {
    3
}
fn default_location_column() -> usize {
    5
}
fn default_header_rows() -> usize {
    1
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            sentence: default_sentence_column(),
            location: default_location_column(),
            header_rows: default_header_rows(),
        }
    }
}

impl ColumnLayout {
    /// Minimum number of columns a sheet needs
    pub fn required_width(&self) -> usize {
        self.sentence.max(self.location) + 1
    }

    /// 1-based spreadsheet row number of the first data row
    pub fn first_data_row(&self) -> usize {
        self.header_rows + 1
    }
}

/// Spreadsheet column letter for a 0-based index (0 → A, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// One spreadsheet row as display strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub cells: Vec<String>,
}

impl SheetRow {
    /// Cell at `index`, empty when the row is shorter
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// The rows of one worksheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    /// Build a sheet from in-memory rows
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| SheetRow {
                    cells: cells.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    /// Number of columns: the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Fail unless the sheet is wide enough for `layout`
    pub fn require_columns(&self, layout: &ColumnLayout) -> Result<(), SheetError> {
        let found = self.width();
        let required = layout.required_width();
        if found < required {
            return Err(SheetError::MissingColumns {
                required,
                found,
                sentence_col: column_letter(layout.sentence),
                location_col: column_letter(layout.location),
            });
        }
        Ok(())
    }
}

/// Read the first worksheet of an `.xlsx`, `.xlsm`, `.xls` or `.ods` file
pub fn load_sheet(path: &Path) -> Result<Sheet, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    // The range starts at the first used cell; re-anchor it at A1 so
    // column indices and row numbers match the spreadsheet
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<SheetRow> = (0..start_row).map(|_| SheetRow::default()).collect();
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(|cell| cell.to_string()));
        rows.push(SheetRow { cells });
    }

    let sheet = Sheet { rows };

    debug!(
        path = %path.display(),
        rows = sheet.rows.len(),
        columns = sheet.width(),
        "Loaded spreadsheet"
    );

    Ok(sheet)
}
