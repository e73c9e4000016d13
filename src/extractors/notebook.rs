use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ExtractError;

/// Notebook document, reduced to what the transcript needs. nbformat v4
/// keeps cells at the top level; v3 splits them into worksheets.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Notebook {
    Current {
        cells: Vec<Cell>,
        #[serde(default)]
        metadata: NotebookMetadata,
    },
    Legacy {
        worksheets: Vec<Worksheet>,
        #[serde(default)]
        metadata: NotebookMetadata,
    },
}

#[derive(Debug, Deserialize)]
struct Worksheet {
    #[serde(default)]
    cells: Vec<Cell>,
}

impl Notebook {
    fn into_parts(self) -> (Vec<Cell>, NotebookMetadata) {
        match self {
            Self::Current { cells, metadata } => (cells, metadata),
            Self::Legacy {
                worksheets,
                metadata,
            } => (
                worksheets.into_iter().flat_map(|ws| ws.cells).collect(),
                metadata,
            ),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NotebookMetadata {
    language_info: Option<LanguageInfo>,
    kernelspec: Option<KernelSpec>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KernelSpec {
    language: Option<String>,
}

/// v3 code cells name their source `input` and carry their own language;
/// v3 heading cells become `#`-prefixed markdown.
#[derive(Debug, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum Cell {
    Markdown {
        source: MultilineText,
    },
    Heading {
        source: MultilineText,
        #[serde(default = "default_heading_level")]
        level: usize,
    },
    Code {
        #[serde(alias = "input")]
        source: MultilineText,
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        outputs: Vec<Output>,
    },
    Raw {},
}

fn default_heading_level() -> usize {
    1
}

/// Any output kind. Only stream outputs contribute their `text`; v3
/// `pyout` results also have a top-level `text`, which is not read.
#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    output_type: String,
    text: Option<MultilineText>,
}

impl Output {
    fn stream_text(self) -> Option<MultilineText> {
        if self.output_type == "stream" {
            self.text
        } else {
            None
        }
    }
}

/// nbformat stores multi-line strings either whole or split into lines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MultilineText {
    Whole(String),
    Lines(Vec<String>),
}

impl MultilineText {
    fn into_string(self) -> String {
        match self {
            Self::Whole(text) => text,
            Self::Lines(lines) => lines.concat(),
        }
    }
}

impl NotebookMetadata {
    fn language(&self) -> &str {
        self.language_info
            .as_ref()
            .and_then(|info| info.name.as_deref())
            .or_else(|| self.kernelspec.as_ref().and_then(|k| k.language.as_deref()))
            .filter(|lang| !lang.is_empty())
            .unwrap_or("python")
    }
}

/// Extract markdown, code and stream output from a Jupyter notebook
///
/// Markdown cells are prefixed with `# `, code cells are fenced with the
/// cell or notebook language and followed by one `Output:` line per stream
/// output. Both nbformat v4 and v3 layouts are accepted.
pub fn extract_notebook(path: &Path) -> Result<String, ExtractError> {
    let raw = fs::read_to_string(path)?;
    let notebook: Notebook = serde_json::from_str(&raw)?;
    let (cells, metadata) = notebook.into_parts();
    let default_language = metadata.language();

    let mut content = Vec::with_capacity(cells.len());
    for cell in cells {
        match cell {
            Cell::Markdown { source } => {
                content.push(format!("# {}", source.into_string()));
            }
            Cell::Heading { source, level } => {
                content.push(format!(
                    "# {} {}",
                    "#".repeat(level.max(1)),
                    source.into_string()
                ));
            }
            Cell::Code {
                source,
                language,
                outputs,
            } => {
                let language = language
                    .as_deref()
                    .filter(|lang| !lang.is_empty())
                    .unwrap_or(default_language);
                content.push(format!("```{}\n{}\n```", language, source.into_string()));
                for text in outputs.into_iter().filter_map(Output::stream_text) {
                    content.push(format!("Output: {}", text.into_string()));
                }
            }
            Cell::Raw {} => {}
        }
    }

    Ok(content.join("\n"))
}
