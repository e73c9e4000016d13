//! Document content extractors
//!
//! This module provides text extraction for the course material formats:
//! - DOCX (Microsoft Word)
//! - PDF
//! - IPYNB (Jupyter notebooks)
//! - PPTX (Microsoft PowerPoint)
//! - SQLITE (embedded databases)
//!
//! Every extractor returns `Result<String, ExtractError>`. Failures are turned
//! into readable content by [`render_extraction`] and nowhere else.

mod docx;
mod notebook;
mod pdf;
mod pptx;
mod sqlite;

#[cfg(test)]
pub(crate) mod fixtures;

pub use docx::extract_docx;
pub use notebook::extract_notebook;
pub use pdf::extract_pdf;
pub use pptx::extract_pptx;
pub use sqlite::extract_sqlite;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::ExtractError;

/// Supported course material format. The serialized form is the format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "docx")]
    Docx,
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "ipynb")]
    Notebook,
    #[serde(rename = "pptx")]
    Slides,
    #[serde(rename = "sqlite")]
    Sqlite,
}

impl Format {
    /// Every supported format, in dispatch order
    pub const ALL: [Format; 5] = [
        Self::Docx,
        Self::Pdf,
        Self::Notebook,
        Self::Slides,
        Self::Sqlite,
    ];

    /// Resolve a file extension (without the dot, any case).
    /// `None` means the file is skipped.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| ext.eq_ignore_ascii_case(format.tag()))
    }

    /// Format tag: the lowercased extension
    pub fn tag(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Notebook => "ipynb",
            Self::Slides => "pptx",
            Self::Sqlite => "sqlite",
        }
    }

    /// Uppercase name used in error markers and the summary
    pub fn label(self) -> &'static str {
        match self {
            Self::Docx => "DOCX",
            Self::Pdf => "PDF",
            Self::Notebook => "IPYNB",
            Self::Slides => "PPTX",
            Self::Sqlite => "SQLITE",
        }
    }

    /// Run the extractor bound to this format
    pub fn extract(self, path: &Path) -> Result<String, ExtractError> {
        match self {
            Self::Docx => extract_docx(path),
            Self::Pdf => extract_pdf(path),
            Self::Notebook => extract_notebook(path),
            Self::Slides => extract_pptx(path),
            Self::Sqlite => extract_sqlite(path),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Turn an extraction result into entry content.
/// Errors become `Error procesando <FORMAT>: <cause>`.
pub fn render_extraction(format: Format, result: Result<String, ExtractError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            log::debug!("{} extraction failed: {}", format.label(), e);
            format!("Error procesando {}: {}", format.label(), e)
        }
    }
}

/// Extract content from any supported file type
pub fn extract_content(path: &Path, format: Format) -> String {
    render_extraction(format, format.extract(path))
}
