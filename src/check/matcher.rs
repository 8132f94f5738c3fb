//! Verbatim containment of a claimed sentence in located text.

/// Result of looking for a sentence in the located blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Index of the first block containing the sentence
    pub block: Option<usize>,

    /// All located blocks joined by a single space, for display on failure
    pub combined: String,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        self.block.is_some()
    }
}

/// Check whether `sentence` appears verbatim in at least one located block
///
/// Containment is tested per block. A sentence that only appears when
/// adjacent blocks are joined does not match; the joined text is still
/// returned so the caller can show it as context.
pub fn evaluate<S: AsRef<str>>(sentence: &str, blocks: &[S]) -> MatchOutcome {
    let sentence = sentence.trim();
    let combined = blocks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    if sentence.is_empty() || combined.trim().is_empty() {
        return MatchOutcome {
            block: None,
            combined,
        };
    }

    let block = blocks.iter().position(|b| b.as_ref().contains(sentence));

    MatchOutcome { block, combined }
}
