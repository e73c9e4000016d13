//! Error types
//!
//! - [`ExtractError`]: a single file could not be read. Never aborts a run;
//!   it is rendered into the entry's content instead.
//! - [`CourseError`]: the run itself failed (missing root, unwritable output).

use std::path::PathBuf;

/// Failure inside one format extractor. The `Display` text is the cause
/// embedded after `Error procesando <FORMAT>: `.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlTree(#[from] xml::reader::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Pdf(#[from] lopdf::Error),

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A required part is absent from an OOXML container.
    #[error("missing part {0}")]
    MissingPart(String),

    /// The parser library panicked on malformed input.
    #[error("parser panicked: {0}")]
    Panicked(String),
}

/// Run-level failure.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("No se encuentra el directorio del curso en {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CourseError>;

impl CourseError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
