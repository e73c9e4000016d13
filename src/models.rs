use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::extractors::Format;

/// A file discovered under the course root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the scanned root, used as the entry key
    pub relative_path: String,
    pub absolute_path: PathBuf,
    /// Lowercased extension without the dot (empty when the file has none)
    pub extension: String,
}

/// Extracted content for one file, as stored in the export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    #[serde(rename = "tipo")]
    pub format: Format,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "ruta_completa")]
    pub full_path: String,
}

/// Run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Every non-directory entry seen under the root
    pub total_files: usize,
    /// Files with a recognized format, whether extraction succeeded or not
    pub processed_files: usize,
}

/// All extracted entries of one run, keyed by relative path.
///
/// Iteration follows insertion (discovery) order, and so does the JSON
/// object produced by `Serialize`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseContentSet {
    entries: Vec<(String, ContentEntry)>,
    /// Position of each key in `entries`
    index: HashMap<String, usize>,
}

impl CourseContentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; an existing key keeps its position and gets the new value.
    pub fn insert(&mut self, relative_path: impl Into<String>, entry: ContentEntry) {
        let relative_path = relative_path.into();
        match self.index.get(&relative_path) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(relative_path.clone(), self.entries.len());
                self.entries.push((relative_path, entry));
            }
        }
    }

    pub fn get(&self, relative_path: &str) -> Option<&ContentEntry> {
        self.index
            .get(relative_path)
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Relative paths in lexicographic order
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.iter().map(|(path, _)| path.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    /// Entry count per format, in order of first appearance
    pub fn format_counts(&self) -> Vec<(Format, usize)> {
        let mut counts: Vec<(Format, usize)> = Vec::new();
        for (_, entry) in &self.entries {
            match counts.iter_mut().find(|(format, _)| *format == entry.format) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.format, 1)),
            }
        }
        counts
    }
}

impl Serialize for CourseContentSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, entry) in &self.entries {
            map.serialize_entry(path, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CourseContentSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = CourseContentSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from relative path to content entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = CourseContentSet::new();
                while let Some((path, entry)) = access.next_entry::<String, ContentEntry>()? {
                    set.insert(path, entry);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(format: Format, content: &str) -> ContentEntry {
        ContentEntry {
            format,
            content: content.to_string(),
            full_path: format!("/curso/{}", content),
        }
    }

    #[test]
    fn test_insert_keeps_discovery_order() {
        let mut set = CourseContentSet::new();
        set.insert("z.pdf", entry(Format::Pdf, "z"));
        set.insert("a.docx", entry(Format::Docx, "a"));
        set.insert("z.pdf", entry(Format::Pdf, "z2"));

        let keys: Vec<&str> = set.iter().map(|(path, _)| path).collect();
        assert_eq!(keys, vec!["z.pdf", "a.docx"]);
        assert_eq!(set.get("z.pdf").unwrap().content, "z2");
        assert_eq!(set.sorted_paths(), vec!["a.docx", "z.pdf"]);
    }

    #[test]
    fn test_large_set_keeps_order_and_lookups() {
        let mut set = CourseContentSet::new();
        for i in (0..5000).rev() {
            set.insert(format!("f{:05}.pdf", i), entry(Format::Pdf, &i.to_string()));
        }
        set.insert("f00042.pdf", entry(Format::Pdf, "otra"));

        assert_eq!(set.len(), 5000);
        assert_eq!(set.iter().next().unwrap().0, "f04999.pdf");
        assert_eq!(set.get("f00042.pdf").unwrap().content, "otra");
        assert_eq!(set.get("f00000.pdf").unwrap().content, "0");
        assert!(set.get("f05000.pdf").is_none());
        assert_eq!(set.sorted_paths()[0], "f00000.pdf");
    }

    #[test]
    fn test_format_counts_follow_first_appearance() {
        let mut set = CourseContentSet::new();
        set.insert("1.pdf", entry(Format::Pdf, "1"));
        set.insert("2.ipynb", entry(Format::Notebook, "2"));
        set.insert("3.pdf", entry(Format::Pdf, "3"));

        assert_eq!(
            set.format_counts(),
            vec![(Format::Pdf, 2), (Format::Notebook, 1)]
        );
    }

    #[test]
    fn test_json_object_uses_export_field_names() {
        let mut set = CourseContentSet::new();
        set.insert("mod1/b.ipynb", entry(Format::Notebook, "celda"));
        set.insert("a.sqlite", entry(Format::Sqlite, "tabla"));

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"mod1/b.ipynb":{"tipo":"ipynb","contenido":"celda","ruta_completa":"/curso/celda"},"a.sqlite":{"tipo":"sqlite","contenido":"tabla","ruta_completa":"/curso/tabla"}}"#
        );

        let back: CourseContentSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
