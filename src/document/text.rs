//! Plain-text documents: one paragraph per line.

use super::DocumentError;

/// Split UTF-8 text into paragraphs, one per line
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Ok(text.lines().map(str::to_string).collect())
}
