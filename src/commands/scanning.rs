use std::path::Path;
use walkdir::WalkDir;

use crate::error::{CourseError, Result};
use crate::extractors::{extract_content, Format};
use crate::models::{ContentEntry, CourseContentSet, ScanStats, SourceFile};

/// Everything collected by one pass over the course tree
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub contents: CourseContentSet,
    pub stats: ScanStats,
}

/// Scan a folder and extract every supported document (DOCX, PDF, IPYNB, PPTX, SQLITE)
///
/// Files are visited one at a time; within a directory its files come
/// before its subdirectories. Every file is counted; files with a supported extension are extracted and kept
/// when the extraction produced any content. A failed extraction is kept too,
/// as its error marker text.
pub fn scan_course(root: &Path) -> Result<ScanOutcome> {
    if !root.is_dir() {
        return Err(CourseError::RootNotFound(root.to_path_buf()));
    }
    let root = root.canonicalize().map_err(|e| CourseError::io(root, e))?;

    log::info!("Scanning course folder: {}", root.display());

    let mut outcome = ScanOutcome::default();

    let walker = WalkDir::new(&root)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        // symlinks to directories are not followed and not counted
        if entry.file_type().is_dir() || entry.path().is_dir() {
            continue;
        }

        let source = discover(&root, entry.path());
        outcome.stats.total_files += 1;

        if let Some(format) = Format::from_extension(&source.extension) {
            outcome.stats.processed_files += 1;
            let content = extract_content(&source.absolute_path, format);

            if !content.is_empty() {
                outcome.contents.insert(
                    source.relative_path.clone(),
                    ContentEntry {
                        format,
                        content,
                        full_path: source.absolute_path.to_string_lossy().to_string(),
                    },
                );
            }
        }

        log::info!("Procesado: {}", source.relative_path);
    }

    Ok(outcome)
}

fn discover(root: &Path, path: &Path) -> SourceFile {
    let relative = path.strip_prefix(root).unwrap_or(path);
    SourceFile {
        relative_path: relative.to_string_lossy().to_string(),
        absolute_path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    }
}
