//! Addressable index over a document's paragraphs.
//!
//! Line numbers are assigned according to an [`IndexPolicy`]:
//!
//! - **Dense**: only non-blank paragraphs get a line number
//! - **Sparse**: every paragraph gets a line number, so blank lines keep
//!   later addresses stable
//! - **Labeled**: paragraphs carry their own `L<line>:T<tab>:` prefix and
//!   positional counting is ignored
//!
//! The index is built once and is read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{LocationKey, Paragraph};

/// How paragraphs are assigned line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Blank paragraphs are invisible to addressing
    Dense,
    /// Every paragraph counts, blank ones included
    #[default]
    Sparse,
    /// Addresses come from an embedded `L<line>:T<tab>:` label
    Labeled,
}

impl IndexPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexPolicy::Dense => "dense",
            IndexPolicy::Sparse => "sparse",
            IndexPolicy::Labeled => "labeled",
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(IndexPolicy::Dense),
            "sparse" => Ok(IndexPolicy::Sparse),
            "labeled" | "labelled" => Ok(IndexPolicy::Labeled),
            other => Err(format!(
                "unknown indexing policy '{}' (expected dense, sparse or labeled)",
                other
            )),
        }
    }
}

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| Regex::new(r"^L([0-9]+):T([0-9]+):").expect("label pattern is valid"))
}

/// Split an embedded `L<line>:T<tab>:` label off the front of a paragraph
///
/// Returns the declared key and the remaining text, or `None` if the
/// paragraph carries no label.
pub fn parse_label(text: &str) -> Option<(LocationKey, &str)> {
    let trimmed = text.trim_start();
    let caps = label_regex().captures(trimmed)?;
    let line = caps[1].parse().ok()?;
    let tab_depth = caps[2].parse().ok()?;
    let rest = &trimmed[caps[0].len()..];
    Some((LocationKey::new(line, tab_depth), rest))
}

/// Assign line numbers to raw paragraph texts under `policy`
///
/// Under the labeled policy, paragraphs without a label are dropped since
/// nothing addresses them.
pub fn number_paragraphs<I, S>(raw: I, policy: IndexPolicy) -> Vec<Paragraph>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paragraphs = Vec::new();
    let mut line: u32 = 0;

    for (ordinal, text) in raw.into_iter().enumerate() {
        let text = text.as_ref();
        match policy {
            IndexPolicy::Sparse => {
                line += 1;
                paragraphs.push(Paragraph::new(line, text));
            }
            IndexPolicy::Dense => {
                if text.trim().is_empty() {
                    continue;
                }
                line += 1;
                paragraphs.push(Paragraph::new(line, text));
            }
            IndexPolicy::Labeled => match parse_label(text) {
                Some((key, rest)) => paragraphs.push(Paragraph {
                    line: key.line,
                    raw: text.to_string(),
                    tab_depth: key.tab_depth,
                    text: rest.trim().to_string(),
                }),
                None => {
                    debug!(paragraph = ordinal + 1, "Skipping unlabeled paragraph");
                }
            },
        }
    }

    paragraphs
}

/// Read-only mapping from location keys to paragraph text
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    policy: IndexPolicy,
    /// Trimmed text of every non-blank paragraph
    texts: BTreeMap<LocationKey, String>,
    /// Keys declared at each line in document order, blank paragraphs included
    lines: BTreeMap<u32, Vec<LocationKey>>,
}

impl DocumentIndex {
    /// Build an index from raw paragraph texts in document order
    pub fn build<I, S>(raw: I, policy: IndexPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_paragraphs(number_paragraphs(raw, policy), policy)
    }

    /// Build an index from already numbered paragraphs
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>, policy: IndexPolicy) -> Self {
        let mut texts = BTreeMap::new();
        let mut lines: BTreeMap<u32, Vec<LocationKey>> = BTreeMap::new();

        for para in paragraphs {
            let key = para.key();
            let declared = lines.entry(key.line).or_default();

            if declared.contains(&key) {
                warn!(key = %key, "Duplicate location label, keeping the first occurrence");
                continue;
            }

            declared.push(key);

            if !para.is_blank() {
                texts.insert(key, para.text);
            }
        }

        debug!(
            policy = %policy,
            keys = texts.len(),
            lines = lines.len(),
            "Built document index"
        );

        Self {
            policy,
            texts,
            lines,
        }
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Text stored at `key`, if the paragraph there is non-blank
    pub fn text(&self, key: &LocationKey) -> Option<&str> {
        self.texts.get(key).map(String::as_str)
    }

    /// Whether `key` addresses a non-blank paragraph
    pub fn contains(&self, key: &LocationKey) -> bool {
        self.texts.contains_key(key)
    }

    /// Keys declared at `line`, regardless of whether they carry text
    pub fn keys_at_line(&self, line: u32) -> &[LocationKey] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or_default()
    }

    /// Line→keys map covering blank paragraphs too
    pub fn lines(&self) -> &BTreeMap<u32, Vec<LocationKey>> {
        &self.lines
    }

    /// All addressable keys and their text, in line order
    pub fn entries(&self) -> impl Iterator<Item = (&LocationKey, &str)> {
        self.texts.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Texts for `keys`, skipping any key without text
    pub fn texts_for(&self, keys: &[LocationKey]) -> Vec<&str> {
        keys.iter().filter_map(|k| self.text(k)).collect()
    }

    /// Number of addressable (non-blank) paragraphs
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
