//! minutecheck - verify that spreadsheet sentences appear verbatim in
//! paragraph-numbered meeting minutes
//!
//! Each spreadsheet row claims that a sentence appears at a location such
//! as `L12:T1` (line 12, one tab deep). The document is indexed into
//! addressable paragraphs, the location is resolved, and the sentence is
//! checked for verbatim containment. When it is not there, the parts of the
//! sentence missing from the document are highlighted.
//!
//! # Modules
//!
//! - `document`: paragraph extraction (.docx, plain text) and the location index
//! - `location`: the location reference grammar and its resolution
//! - `check`: containment, difference highlighting, row orchestration
//! - `sheet`: spreadsheet loading and column layout
//! - `report`: report assembly and output formats
//! - `domain`: shared data types (keys, paragraphs, row results)
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a spreadsheet against the minutes
//! minutecheck check minutes.docx claims.xlsx
//!
//! # See how the minutes are addressed
//! minutecheck index minutes.docx --policy dense
//!
//! # Try a location reference
//! minutecheck resolve minutes.docx "L3:T0 - L6:T0"
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod document;
pub mod domain;
pub mod location;
pub mod report;
pub mod sheet;

// Re-export main types at crate root for convenience
pub use check::{CheckOptions, MarkerStyle, RowChecker, Summary};
pub use document::{DocumentIndex, IndexPolicy};
pub use domain::{CheckRow, CheckStatus, LocationKey, Paragraph};
pub use location::{LocationReference, ResolveMode, Resolver};
pub use report::{CheckReport, ReportFormat};
