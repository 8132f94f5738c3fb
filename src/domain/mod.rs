//! Domain types for minutecheck.
//!
//! This module contains the core data structures:
//! - Paragraph / LocationKey: addressable units of a document
//! - CheckRow: the result of checking one spreadsheet row

pub mod paragraph;
pub mod row;

// Re-export commonly used types
pub use paragraph::{count_tabs, LocationKey, Paragraph};
pub use row::{CheckRow, CheckStatus, UnresolvedReason};
