//! Per-row check results.
//!
//! A `CheckRow` is produced once per non-blank spreadsheet row and never
//! modified afterwards.

use serde::{Deserialize, Serialize};

use super::paragraph::LocationKey;

/// Outcome of checking one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Sentence found verbatim at the referenced location
    Match,
    /// Location resolved but the sentence is not there as stated
    Mismatch,
    /// Location reference could not be resolved
    UnresolvedLocation,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Match => "match",
            CheckStatus::Mismatch => "mismatch",
            CheckStatus::UnresolvedLocation => "unresolved_location",
        }
    }

    /// Short label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Match => "✅ Correct",
            CheckStatus::Mismatch => "❌ Incorrect",
            CheckStatus::UnresolvedLocation => "❌ Error",
        }
    }
}

/// Why a location could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// The reference does not follow the location grammar
    Malformed,
    /// The reference parsed but addresses nothing in the document
    NotFound,
}

/// Result record for one spreadsheet row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRow {
    /// 1-based spreadsheet row number
    pub row: usize,

    /// Location reference as written in the spreadsheet
    pub location: String,

    /// Claimed sentence as written in the spreadsheet
    pub sentence: String,

    pub status: CheckStatus,

    /// Human-readable explanation of the status
    pub detail: String,

    /// Keys the location resolved to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<LocationKey>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnresolvedReason>,

    /// Sentence with the parts missing from the document marked (mismatch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,

    /// Located document text the sentence was compared against (mismatch only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub located_text: Option<String>,
}

impl CheckRow {
    /// Create a row whose sentence was found
    pub fn matched(row: usize, location: String, sentence: String, keys: Vec<LocationKey>) -> Self {
        let detail = format!(
            "The sentence was found exactly as stated in the document at `{}`.",
            location
        );
        Self {
            row,
            location,
            sentence,
            status: CheckStatus::Match,
            detail,
            keys,
            reason: None,
            highlighted: None,
            located_text: None,
        }
    }

    /// Create a row whose sentence differs from the located text
    pub fn mismatched(
        row: usize,
        location: String,
        sentence: String,
        keys: Vec<LocationKey>,
        highlighted: String,
        located_text: String,
    ) -> Self {
        let detail = format!(
            "The sentence was not found as stated at `{}`. Differences are highlighted below.",
            location
        );
        Self {
            row,
            location,
            sentence,
            status: CheckStatus::Mismatch,
            detail,
            keys,
            reason: None,
            highlighted: Some(highlighted),
            located_text: Some(located_text),
        }
    }

    /// Create a row whose location could not be resolved
    pub fn unresolved(
        row: usize,
        location: String,
        sentence: String,
        reason: UnresolvedReason,
    ) -> Self {
        let detail = match reason {
            UnresolvedReason::Malformed => format!(
                "The location `{}` could not be parsed. Expected `L<line>:T<tab>`, `L<line>:C`, \
                 or two of these joined by ` - `.",
                location
            ),
            UnresolvedReason::NotFound => format!(
                "The specified location `{}` was not found in the document. Expected \
                 `L<line>:T<tab>`, `L<line>:C`, or two of these joined by ` - `.",
                location
            ),
        };
        Self {
            row,
            location,
            sentence,
            status: CheckStatus::UnresolvedLocation,
            detail,
            keys: Vec::new(),
            reason: Some(reason),
            highlighted: None,
            located_text: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_detail_names_reference() {
        let row = CheckRow::unresolved(
            4,
            "L9:X".to_string(),
            "Quorum".to_string(),
            UnresolvedReason::Malformed,
        );
        assert_eq!(row.status, CheckStatus::UnresolvedLocation);
        assert!(row.detail.contains("`L9:X`"));
        assert!(row.detail.contains("L<line>:C"));
        assert!(row.highlighted.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let row = CheckRow::matched(
            2,
            "L1:T0".to_string(),
            "Hello".to_string(),
            vec![LocationKey::new(1, 0)],
        );
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"status\":\"match\""));
        assert!(!json.contains("highlighted"));
        assert!(!json.contains("reason"));

        let parsed: CheckRow = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.keys, vec![LocationKey::new(1, 0)]);
    }
}
