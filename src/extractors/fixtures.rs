//! Sample documents written at test time with the same crates the
//! extractors read them with.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const SLIDE_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn write_zip(path: &Path, parts: &[(&str, String)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, body) in parts {
        zip.start_file(*name, FileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Word paragraph with a single run
pub fn docx_paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

/// `word/document.xml` with the given raw body markup
pub fn docx_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

/// Minimal DOCX with one single-run paragraph per item
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs.iter().map(|p| docx_paragraph(p)).collect();
    write_zip(path, &[("word/document.xml", docx_document(&body))]);
}

/// `p:sp` shape with one text paragraph per item
pub fn pptx_text_shape(id: u32, paragraphs: &[&str]) -> String {
    let paras: String = paragraphs
        .iter()
        .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(p)))
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Shape {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        id, id, paras
    )
}

pub fn pptx_slide(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="{}" xmlns:p="{}" xmlns:r="{}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        A_NS, P_NS, R_NS, shapes
    )
}

/// PPTX whose slides appear in `order` (indices into `slides`) in the
/// presentation, so part names and slide order can differ.
pub fn write_pptx_ordered(path: &Path, slides: &[String], order: &[usize]) {
    let mut parts: Vec<(String, String)> = Vec::new();

    let sld_ids: String = order
        .iter()
        .enumerate()
        .map(|(pos, idx)| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + pos, idx + 10))
        .collect();
    parts.push((
        "ppt/presentation.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:a="{}" xmlns:p="{}" xmlns:r="{}"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
            A_NS, P_NS, R_NS, sld_ids
        ),
    ));

    let rels: String = (0..slides.len())
        .map(|idx| {
            format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                idx + 10,
                SLIDE_REL,
                idx + 1
            )
        })
        .collect();
    parts.push((
        "ppt/_rels/presentation.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">{}</Relationships>"#,
            PKG_REL_NS, rels
        ),
    ));

    for (idx, slide) in slides.iter().enumerate() {
        parts.push((format!("ppt/slides/slide{}.xml", idx + 1), slide.clone()));
    }

    let borrowed: Vec<(&str, String)> = parts
        .iter()
        .map(|(name, body)| (name.as_str(), body.clone()))
        .collect();
    write_zip(path, &borrowed);
}

/// PPTX with one text shape per item on each slide, in natural order
pub fn write_pptx(path: &Path, slides: &[&[&str]]) {
    let xml: Vec<String> = slides
        .iter()
        .map(|shapes| {
            let body: String = shapes
                .iter()
                .enumerate()
                .map(|(i, text)| pptx_text_shape(i as u32 + 2, &[text]))
                .collect();
            pptx_slide(&body)
        })
        .collect();
    let order: Vec<usize> = (0..slides.len()).collect();
    write_pptx_ordered(path, &xml, &order);
}

/// PDF with one line of Courier text per page
pub fn write_pdf(path: &Path, pages: &[&str]) {
    write_pdf_with_font_type(path, pages, "Font");
}

/// Same as [`write_pdf`] with a chosen `/Type` on the font dictionary
pub fn write_pdf_with_font_type(path: &Path, pages: &[&str], font_type: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => Object::Name(font_type.as_bytes().to_vec()),
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

pub fn write_notebook(path: &Path, notebook: &serde_json::Value) {
    std::fs::write(path, serde_json::to_vec_pretty(notebook).unwrap()).unwrap();
}
