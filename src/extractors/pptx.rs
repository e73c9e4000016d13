use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;
use xml::reader::{EventReader, XmlEvent};
use zip::ZipArchive;

use crate::error::ExtractError;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Extract text content from a PPTX file
///
/// PPTX files are ZIP archives containing XML files.
/// Slide order comes from the `sldIdLst` in ppt/presentation.xml, whose
/// relationship ids resolve to slide parts through the presentation rels.
/// Each top-level shape with non-blank text becomes one line.
pub fn extract_pptx(path: &Path) -> Result<String, ExtractError> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let slide_parts = slide_part_names(&mut archive)?;

    let mut lines = Vec::new();
    for part in slide_parts {
        let slide = archive
            .by_name(&part)
            .map_err(|_| ExtractError::MissingPart(part.clone()))?;
        for text in read_shape_texts(BufReader::new(slide))? {
            if !text.trim().is_empty() {
                lines.push(text);
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Slide part names in presentation order
fn slide_part_names<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<String>, ExtractError> {
    let slide_ids = {
        let presentation = archive
            .by_name(PRESENTATION_PART)
            .map_err(|_| ExtractError::MissingPart(PRESENTATION_PART.to_string()))?;
        read_slide_rel_ids(BufReader::new(presentation))?
    };

    let targets = {
        let rels = archive
            .by_name(PRESENTATION_RELS_PART)
            .map_err(|_| ExtractError::MissingPart(PRESENTATION_RELS_PART.to_string()))?;
        read_relationship_targets(BufReader::new(rels))?
    };

    slide_ids
        .into_iter()
        .map(|id| {
            targets
                .get(&id)
                .map(|target| resolve_target(target))
                .ok_or_else(|| ExtractError::MissingPart(format!("slide relationship {}", id)))
        })
        .collect()
}

/// `r:id` of every `p:sldId`, in list order
fn read_slide_rel_ids<R: Read>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut ids = Vec::new();
    for event in EventReader::new(source) {
        if let XmlEvent::StartElement {
            name, attributes, ..
        } = event?
        {
            if name.local_name == "sldId" {
                // The plain `id` attribute is numeric; the relationship id is prefixed
                if let Some(attr) = attributes
                    .into_iter()
                    .find(|a| a.name.local_name == "id" && a.name.prefix.is_some())
                {
                    ids.push(attr.value);
                }
            }
        }
    }
    Ok(ids)
}

/// Relationship `Id` -> `Target` for one rels part
fn read_relationship_targets<R: Read>(source: R) -> Result<HashMap<String, String>, ExtractError> {
    let mut targets = HashMap::new();
    for event in EventReader::new(source) {
        if let XmlEvent::StartElement {
            name, attributes, ..
        } = event?
        {
            if name.local_name == "Relationship" {
                let mut id = None;
                let mut target = None;
                for attr in attributes {
                    match attr.name.local_name.as_str() {
                        "Id" => id = Some(attr.value),
                        "Target" => target = Some(attr.value),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
        }
    }
    Ok(targets)
}

/// Targets are relative to `ppt/` unless they start at the package root
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Text of each shape placed directly in the slide's shape tree.
/// Group shapes, tables and pictures expose no text.
fn read_shape_texts<R: BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::with_capacity(512);

    let mut shapes = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut depth: usize = 0;
    let mut tree_depth: Option<usize> = None;
    let mut shape_depth: Option<usize> = None;
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"spTree" if tree_depth.is_none() => tree_depth = Some(depth),
                    b"sp" if shape_depth.is_none()
                        && tree_depth.is_some_and(|tree| tree + 1 == depth) =>
                    {
                        shape_depth = Some(depth);
                        paragraphs.clear();
                    }
                    b"p" if shape_depth.is_some() => {
                        in_paragraph = true;
                        current.clear();
                    }
                    b"t" if in_paragraph => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if shape_depth.is_some() {
                    match e.local_name().as_ref() {
                        b"p" => paragraphs.push(String::new()),
                        b"br" if in_paragraph => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if in_text {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => {
                match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if in_paragraph => {
                        paragraphs.push(std::mem::take(&mut current));
                        in_paragraph = false;
                    }
                    b"sp" if shape_depth == Some(depth) => {
                        if !paragraphs.is_empty() {
                            shapes.push(paragraphs.join("\n"));
                        }
                        paragraphs.clear();
                        shape_depth = None;
                    }
                    b"spTree" if tree_depth == Some(depth) => tree_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(shapes)
}
