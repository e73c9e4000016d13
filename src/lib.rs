//! Course material extractor
//!
//! Walks a course folder, pulls the text out of every DOCX, PDF, notebook,
//! PPTX and SQLite file, and writes a JSON export, a flattened transcript
//! and a summary.

pub mod commands;
pub mod config;
pub mod error;
pub mod extractors;
pub mod models;

use std::path::PathBuf;

pub use commands::{load_export, scan_course, write_reports, ScanOutcome};
pub use config::{Config, OutputPaths};
pub use error::{CourseError, ExtractError, Result};
pub use extractors::Format;
pub use models::{ContentEntry, CourseContentSet, ScanStats, SourceFile};

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: ScanStats,
    pub entries: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Scan the configured course root and write the three artifacts.
///
/// A missing root fails before anything is read or written.
pub fn run(config: &Config) -> Result<RunReport> {
    let outcome = scan_course(&config.course_root)?;

    log::info!(
        "Extraction finished: {} files found, {} processed, {} with content",
        outcome.stats.total_files,
        outcome.stats.processed_files,
        outcome.contents.len()
    );

    write_reports(&outcome.contents, &config.outputs, &config.title)?;

    Ok(RunReport {
        stats: outcome.stats,
        entries: outcome.contents.len(),
        artifacts: config
            .outputs
            .all()
            .iter()
            .map(|path| path.to_path_buf())
            .collect(),
    })
}
