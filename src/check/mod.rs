//! Sentence verification: containment, difference highlighting and the
//! row-level orchestration that ties them to location resolution.
//!
//! # Example
//!
//! ```ignore
//! use minutecheck::check::{CheckOptions, RowChecker};
//! use minutecheck::document::{DocumentIndex, IndexPolicy};
//!
//! let index = DocumentIndex::build(paragraphs, IndexPolicy::Sparse);
//! let checker = RowChecker::new(&index, CheckOptions::default());
//! let results = checker.check_sheet(&sheet, &layout)?;
//! ```

pub mod checker;
pub mod highlight;
pub mod matcher;

pub use checker::{default_null_markers, is_blank_cell, CheckOptions, RowChecker, Summary};
pub use highlight::{
    highlight, highlight_diff, opcodes, render, DiffOp, DiffTag, Fragment, FragmentKind,
    MarkerStyle,
};
pub use matcher::{evaluate, MatchOutcome};
