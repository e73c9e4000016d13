//! The three artifacts derived from a [`CourseContentSet`]:
//! - structured JSON export
//! - flattened transcript
//! - summary with per-format counts and the sorted file list

use std::fs;
use std::path::Path;

use crate::config::OutputPaths;
use crate::error::{CourseError, Result};
use crate::models::CourseContentSet;

const SEPARATOR_WIDTH: usize = 80;

/// Pretty-printed JSON keyed by relative path, non-ASCII kept as is
pub fn render_json(contents: &CourseContentSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(contents)?)
}

/// Every entry in set order, each closed by a rule of `=`
pub fn render_transcript(contents: &CourseContentSet, title: &str) -> String {
    let mut out = format!("# CONTENIDO COMPLETO DEL CURSO DE {}\n\n", title);
    let rule = "=".repeat(SEPARATOR_WIDTH);

    for (path, entry) in contents.iter() {
        out.push_str(&format!(
            "## ARCHIVO: {}\nTipo: {}\nContenido:\n{}\n\n{}\n\n",
            path,
            entry.format.tag(),
            entry.content,
            rule
        ));
    }

    out
}

pub fn render_summary(contents: &CourseContentSet, title: &str) -> String {
    let mut out = format!("# RESUMEN DEL CURSO DE {}\n\n", title);

    out.push_str("## ESTADÍSTICAS:\n");
    for (format, count) in contents.format_counts() {
        out.push_str(&format!("- {}: {} archivos\n", format.label(), count));
    }

    out.push_str(&format!(
        "\nTotal de archivos procesados: {}\n",
        contents.len()
    ));

    out.push_str("\n## LISTA DE ARCHIVOS:\n");
    for path in contents.sorted_paths() {
        out.push_str(&format!("- {}\n", path));
    }

    out
}

/// Write all three artifacts
pub fn write_reports(contents: &CourseContentSet, outputs: &OutputPaths, title: &str) -> Result<()> {
    write_artifact(&outputs.json, &render_json(contents)?)?;
    write_artifact(&outputs.transcript, &render_transcript(contents, title))?;
    write_artifact(&outputs.summary, &render_summary(contents, title))?;
    Ok(())
}

/// Read a JSON export back into a content set
pub fn load_export(path: &Path) -> Result<CourseContentSet> {
    let raw = fs::read_to_string(path).map_err(|e| CourseError::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_artifact(path: &Path, body: &str) -> Result<()> {
    fs::write(path, body).map_err(|e| CourseError::io(path, e))?;
    log::debug!("Wrote {} ({} bytes)", path.display(), body.len());
    Ok(())
}
