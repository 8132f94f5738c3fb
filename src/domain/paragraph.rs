//! Paragraphs and the keys that address them.
//!
//! A paragraph is addressed by `(line, tab_depth)`, written `L<line>:T<tab>`
//! in spreadsheets and reports.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One paragraph after line numbers have been assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// 1-based line number under the active indexing policy
    pub line: u32,

    /// Text exactly as extracted from the document
    pub raw: String,

    /// Indentation depth used for addressing
    pub tab_depth: u32,

    /// Text with surrounding whitespace removed
    pub text: String,
}

impl Paragraph {
    /// Create a positional paragraph; tab depth is the count of literal tabs in `raw`
    pub fn new(line: u32, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tab_depth = count_tabs(&raw);
        let text = raw.trim().to_string();
        Self {
            line,
            raw,
            tab_depth,
            text,
        }
    }

    /// The key this paragraph is addressed by
    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.line, self.tab_depth)
    }

    /// Whether the paragraph has no visible text
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Number of literal tab characters in a paragraph
pub fn count_tabs(raw: &str) -> u32 {
    raw.chars().filter(|&c| c == '\t').count() as u32
}

/// Address of one paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationKey {
    pub line: u32,
    pub tab_depth: u32,
}

impl LocationKey {
    pub fn new(line: u32, tab_depth: u32) -> Self {
        Self { line, tab_depth }
    }
}

// Keys sort by line; tab depth only breaks ties between labeled duplicates.
impl Ord for LocationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.tab_depth.cmp(&other.tab_depth))
    }
}

impl PartialOrd for LocationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}:T{}", self.line, self.tab_depth)
    }
}
