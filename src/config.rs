//! Run configuration
//!
//! Everything a run needs is passed in explicitly: the course root, where
//! each artifact goes, and the course title printed in the text reports.

use std::path::{Path, PathBuf};

/// Structured export file name
pub const JSON_FILE_NAME: &str = "contenido_curso_completo.json";
/// Flattened transcript file name
pub const TRANSCRIPT_FILE_NAME: &str = "contenido_para_gpt.txt";
/// Summary report file name
pub const SUMMARY_FILE_NAME: &str = "resumen_curso.txt";

pub const DEFAULT_TITLE: &str = "DATA SCIENCE";

/// Destinations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub transcript: PathBuf,
    pub summary: PathBuf,
}

impl OutputPaths {
    /// The standard file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            json: dir.join(JSON_FILE_NAME),
            transcript: dir.join(TRANSCRIPT_FILE_NAME),
            summary: dir.join(SUMMARY_FILE_NAME),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.json, &self.transcript, &self.summary]
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned recursively
    pub course_root: PathBuf,
    pub outputs: OutputPaths,
    /// Course name used in the transcript and summary titles
    pub title: String,
}

impl Config {
    pub fn new(course_root: impl Into<PathBuf>, output_dir: &Path) -> Self {
        Self {
            course_root: course_root.into(),
            outputs: OutputPaths::in_dir(output_dir),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Directory holding the running executable, where artifacts go by default
pub fn default_output_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
