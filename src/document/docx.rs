//! Paragraph extraction from `.docx` files.
//!
//! Reads `word/document.xml` out of the zip container and returns the text of
//! every body-level paragraph in order. Runs contribute their text, tab
//! elements inside runs become `\t` and breaks become `\n`, so a paragraph's
//! indentation survives as literal tab characters. Tab stops in paragraph
//! properties, deleted text, tables and text boxes contribute nothing.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract body paragraphs from raw `.docx` bytes
pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| DocumentError::MissingPart(DOCUMENT_PART.to_string()))?
        .read_to_string(&mut xml)?;

    parse_document_xml(&xml)
}

/// Extract body paragraphs from the `word/document.xml` part
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    // Local names of currently open elements
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && is_body_level(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name == b"p" && is_body_level(&stack) {
                    paragraphs.push(String::new());
                } else if in_body_run(&stack) {
                    if let Some(text) = current.as_mut() {
                        match name {
                            b"tab" | b"ptab" => text.push('\t'),
                            b"br" | b"cr" => text.push('\n'),
                            b"noBreakHyphen" => text.push('-'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) => {
                if stack.last().map(Vec::as_slice) == Some(b"t".as_slice())
                    && in_body_run(&stack[..stack.len() - 1])
                {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => {
                stack.pop();
                if e.local_name().as_ref() == b"p" && is_body_level(&stack) {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Whether a paragraph opened now would be a direct child of `w:body`
fn is_body_level(stack: &[Vec<u8>]) -> bool {
    stack.last().map(Vec::as_slice) == Some(b"body".as_slice())
}

/// Whether the innermost open element is a run belonging to a body paragraph
///
/// Runs may sit directly in the paragraph or inside hyperlinks, smart tags
/// and tracked insertions. Runs inside tracked deletions or move sources are
/// not part of the document.
fn in_body_run(stack: &[Vec<u8>]) -> bool {
    if stack.last().map(Vec::as_slice) != Some(b"r".as_slice()) {
        return false;
    }
    let paragraphs = stack.iter().filter(|name| name.as_slice() == b"p").count();
    let excluded = stack
        .iter()
        .any(|name| matches!(name.as_slice(), b"tbl" | b"del" | b"moveFrom"));
    paragraphs == 1 && !excluded
}
