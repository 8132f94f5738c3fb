//! Difference highlighting between a claimed sentence and located text.
//!
//! The alignment is the longest-matching-block decomposition (Ratcliff /
//! Obershelp): find the longest common run of characters, then recurse on
//! the pieces to its left and right. Every character counts; there is no
//! junk or popularity filtering, so repeated characters in short sentences
//! are accounted for exactly.
//!
//! Alignment runs target-first, source-second: the question is which parts
//! of the source (the claim) survive from the target (the document).

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of an alignment operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Equal,
    /// Present only in the source
    Insert,
    /// Present only in the target
    Delete,
    /// Source run differs from the aligned target run
    Replace,
}

/// One alignment operation over char indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOp {
    pub tag: DiffTag,
    pub target: Range<usize>,
    pub source: Range<usize>,
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each char in `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest run with `a[i..i+k] == b[j..j+k]` inside the given bounds
    ///
    /// Ties go to the run starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        (besti, bestj, bestsize)
    }

    /// Non-overlapping matching blocks in order, ending with a zero-size sentinel
    fn matching_blocks(&self) -> Vec<(usize, usize, usize)> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            blocks.push((i, j, k));
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        blocks.sort_unstable();

        // Merge blocks that touch in both sequences
        let mut merged: Vec<(usize, usize, usize)> = Vec::with_capacity(blocks.len() + 1);
        for (i, j, k) in blocks {
            match merged.last_mut() {
                Some(last) if last.0 + last.2 == i && last.1 + last.2 == j => last.2 += k,
                _ => merged.push((i, j, k)),
            }
        }
        merged.push((la, lb, 0));
        merged
    }

    fn opcodes(&self) -> Vec<DiffOp> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for (ai, bj, size) in self.matching_blocks() {
            let tag = match (i < ai, j < bj) {
                (true, true) => Some(DiffTag::Replace),
                (true, false) => Some(DiffTag::Delete),
                (false, true) => Some(DiffTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(DiffOp {
                    tag,
                    target: i..ai,
                    source: j..bj,
                });
            }
            i = ai + size;
            j = bj + size;
            if size > 0 {
                ops.push(DiffOp {
                    tag: DiffTag::Equal,
                    target: ai..i,
                    source: bj..j,
                });
            }
        }

        ops
    }
}

/// Alignment operations turning `target` into `source`, over char indices
pub fn opcodes(target: &str, source: &str) -> Vec<DiffOp> {
    let a: Vec<char> = target.chars().collect();
    let b: Vec<char> = source.chars().collect();
    BlockMatcher::new(&a, &b).opcodes()
}

/// Whether a piece of the source survived from the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Reproduced contiguously from the target
    Equal,
    /// Missing from or altered relative to the target
    Altered,
}

/// A run of the source with one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub kind: FragmentKind,
}

/// Split `source` into equal and altered runs relative to `target`
///
/// Every equal run appears contiguously in `target`; altered runs are
/// maximal. Concatenating the fragment texts always gives back `source`.
pub fn highlight(source: &str, target: &str) -> Vec<Fragment> {
    if source.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = source.chars().collect();
    let mut fragments: Vec<Fragment> = Vec::new();

    for op in opcodes(target, source) {
        if op.source.is_empty() {
            continue;
        }
        let kind = match op.tag {
            DiffTag::Equal => FragmentKind::Equal,
            _ => FragmentKind::Altered,
        };
        let text: String = chars[op.source].iter().collect();

        // Equal runs split by a target-only deletion stay separate so each
        // one is contiguous in the target
        match fragments.last_mut() {
            Some(last) if last.kind == FragmentKind::Altered && kind == FragmentKind::Altered => {
                last.text.push_str(&text)
            }
            _ => fragments.push(Fragment { text, kind }),
        }
    }

    fragments
}

/// How altered fragments are marked when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Yellow background `<span>`, text HTML-escaped
    Html,
    /// Yellow background terminal escape
    Ansi,
    /// `[[...]]`
    #[default]
    Brackets,
}

const HTML_OPEN: &str = r#"<span style="background-color: #fdd835;">"#;
const HTML_CLOSE: &str = "</span>";
const ANSI_OPEN: &str = "\x1b[30;43m";
const ANSI_CLOSE: &str = "\x1b[0m";
const BRACKET_OPEN: &str = "[[";
const BRACKET_CLOSE: &str = "]]";

impl MarkerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerStyle::Html => "html",
            MarkerStyle::Ansi => "ansi",
            MarkerStyle::Brackets => "brackets",
        }
    }

    fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            MarkerStyle::Html => (HTML_OPEN, HTML_CLOSE),
            MarkerStyle::Ansi => (ANSI_OPEN, ANSI_CLOSE),
            MarkerStyle::Brackets => (BRACKET_OPEN, BRACKET_CLOSE),
        }
    }
}

impl fmt::Display for MarkerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(MarkerStyle::Html),
            "ansi" => Ok(MarkerStyle::Ansi),
            "brackets" => Ok(MarkerStyle::Brackets),
            other => Err(format!(
                "unknown marker style '{}' (expected html, ansi or brackets)",
                other
            )),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render fragments, wrapping each altered run in the style's markers
pub fn render(fragments: &[Fragment], style: MarkerStyle) -> String {
    let (open, close) = style.delimiters();
    let mut out = String::new();

    for fragment in fragments {
        let text = match style {
            MarkerStyle::Html => escape_html(&fragment.text),
            _ => fragment.text.clone(),
        };
        match fragment.kind {
            FragmentKind::Equal => out.push_str(&text),
            FragmentKind::Altered => {
                out.push_str(open);
                out.push_str(&text);
                out.push_str(close);
            }
        }
    }

    out
}

/// Highlight and render in one step
pub fn highlight_diff(source: &str, target: &str, style: MarkerStyle) -> String {
    render(&highlight(source, target), style)
}
