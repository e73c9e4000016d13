use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use zip::ZipArchive;

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract text content from a DOCX file
///
/// DOCX files are ZIP archives containing XML files.
/// The main document content is in word/document.xml
///
/// Only paragraphs placed directly in the document body are read (table
/// cells and text boxes are not), in document order. Blank paragraphs are
/// dropped and the rest are joined one per line.
pub fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let document = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| ExtractError::MissingPart(DOCUMENT_PART.to_string()))?;

    let paragraphs = read_body_paragraphs(BufReader::new(document))?;

    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Stream document.xml and collect the text of each top-level body paragraph
fn read_body_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::with_capacity(1024);

    let mut paragraphs = Vec::new();
    let mut current = String::new();

    let mut depth: usize = 0;
    let mut body_depth: Option<usize> = None;
    let mut paragraph_depth: Option<usize> = None;
    // Depth of a text box inside the current paragraph; its text is skipped
    let mut textbox_depth: Option<usize> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"body" if body_depth.is_none() => body_depth = Some(depth),
                    b"p" if paragraph_depth.is_none()
                        && body_depth.is_some_and(|body| body + 1 == depth) =>
                    {
                        paragraph_depth = Some(depth);
                        current.clear();
                    }
                    b"txbxContent" if paragraph_depth.is_some() && textbox_depth.is_none() => {
                        textbox_depth = Some(depth);
                    }
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if paragraph_depth.is_some() && textbox_depth.is_none() {
                    match e.local_name().as_ref() {
                        b"tab" => current.push('\t'),
                        b"br" | b"cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if in_text && paragraph_depth.is_some() && textbox_depth.is_none() {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if paragraph_depth == Some(depth) => {
                        paragraphs.push(std::mem::take(&mut current));
                        paragraph_depth = None;
                    }
                    b"body" if body_depth == Some(depth) => body_depth = None,
                    _ => {}
                }
                if textbox_depth == Some(depth) {
                    textbox_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
