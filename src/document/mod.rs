//! Document loading and indexing.
//!
//! A document is consumed only as an ordered sequence of paragraph texts.
//! Extraction from the container format (`.docx` or plain text) is separate
//! from the [`DocumentIndex`] that makes paragraphs addressable.

pub mod docx;
pub mod index;
pub mod text;

use std::path::Path;

use thiserror::Error;

pub use index::{number_paragraphs, parse_label, DocumentIndex, IndexPolicy};

/// Errors reading a document. All of them abort the batch.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid .docx container: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("Document container has no {0} part")]
    MissingPart(String),

    #[error("Malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Container format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.docx` is plain text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("docx") => DocumentFormat::Docx,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Extract paragraph texts from document bytes
pub fn extract_paragraphs(bytes: &[u8], format: DocumentFormat) -> Result<Vec<String>, DocumentError> {
    match format {
        DocumentFormat::Docx => docx::extract_paragraphs(bytes),
        DocumentFormat::PlainText => text::extract_paragraphs(bytes),
    }
}

/// Read a document from disk and return its paragraph texts
pub async fn load_document(path: &Path) -> Result<Vec<String>, DocumentError> {
    let bytes = tokio::fs::read(path).await?;
    extract_paragraphs(&bytes, DocumentFormat::from_path(path))
}
