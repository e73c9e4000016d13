use lopdf::Document;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use crate::error::ExtractError;

/// Extract text content from a PDF file
///
/// This extracts text from "digital-native" PDFs that contain
/// selectable text. Scanned documents (image-only PDFs) will
/// return empty or minimal content - no OCR is performed.
///
/// Pages are read one at a time, in page order, and joined one page per
/// line. A page whose text cannot be decoded contributes an empty line;
/// a document that cannot be loaded, or that makes lopdf panic, is an error.
pub fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let doc = guarded(path, || Document::load(path))??;

    let mut pages = Vec::new();
    for page_num in doc.get_pages().into_keys() {
        match guarded(path, || doc.extract_text(&[page_num]))? {
            Ok(text) => pages.push(text.trim_end_matches('\n').to_string()),
            Err(e) => {
                log::warn!("PDF page {} of {:?} has no readable text: {}", page_num, path, e);
                pages.push(String::new());
            }
        }
    }

    Ok(pages.join("\n"))
}

/// Run a lopdf call, turning a panic into [`ExtractError::Panicked`]
fn guarded<T>(path: &Path, f: impl FnOnce() -> T) -> Result<T, ExtractError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        log::error!("lopdf panicked on {:?}: {}", path, message);
        ExtractError::Panicked(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
