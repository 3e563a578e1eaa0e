/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::fs;
use std::path::{Path, PathBuf};

use biblatex::{Field, RawBibliography, RawChunk, RawEntry};
use indexmap::IndexMap;

use crate::entry::{EntryType, ParsedEntry};
use crate::error::{BibError, Result};

/// Load every entry of a BibTeX file.
///
/// Unreadable or unparsable files are an error; there are no partial results.
pub fn load_bibtex(path: &Path) -> Result<Vec<ParsedEntry>> {
    let src = fs::read_to_string(path).map_err(|source| BibError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bibtex(&src, path)
}

/// Parse BibTeX source, tagging entries with `source_path` for provenance.
///
/// Field values are kept as written, TeX markup included, in declaration
/// order. `@string` abbreviations are expanded; any other bare word
/// (`month = jan`) is kept as is.
pub fn parse_bibtex(src: &str, source_path: &Path) -> Result<Vec<ParsedEntry>> {
    let raw = RawBibliography::parse(src).map_err(|e| BibError::Parse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut strings: IndexMap<String, String> = IndexMap::new();
    for pair in &raw.abbreviations {
        let value = field_value(&pair.value.v, &strings);
        strings.insert(pair.key.v.to_lowercase(), value);
    }

    Ok(raw
        .entries
        .iter()
        .map(|entry| from_raw(&entry.v, &strings, source_path))
        .collect())
}

fn from_raw(
    entry: &RawEntry,
    strings: &IndexMap<String, String>,
    source_path: &Path,
) -> ParsedEntry {
    let raw_fields: IndexMap<String, String> = entry
        .fields
        .iter()
        .map(|pair| (pair.key.v.to_lowercase(), field_value(&pair.value.v, strings)))
        .collect();

    let entry_type = EntryType::from(entry.kind.v);
    ParsedEntry::new(entry.key.v, entry_type, raw_fields, source_path)
}

/// Join the `#`-concatenated parts of a field.
fn field_value(field: &Field, strings: &IndexMap<String, String>) -> String {
    field
        .iter()
        .map(|chunk| match chunk.v {
            RawChunk::Normal(s) => s.to_string(),
            RawChunk::Abbreviation(name) => strings
                .get(&name.to_lowercase())
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        })
        .collect()
}

/// The `.bib` files directly inside `dir`, sorted by name.
pub fn find_bib_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read = fs::read_dir(dir).map_err(|source| BibError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for dir_entry in read {
        let path = dir_entry?.path();
        let is_bib = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("bib"));
        if is_bib && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
@article{weichselbraun2009,
  author = {Albert Weichselbraun and Arno Scharl},
  title = {Optimizing {NASA} Ontology Learning},
  journal = {Journal of Things},
  year = {2009},
}

@inproceedings{scharl2020,
  author = {Scharl, Arno},
  title = {Visual Analytics},
  booktitle = {Proceedings},
  year = 2020,
}
"#;

    #[test]
    fn parses_entries_with_types_and_fields() {
        let entries = parse_bibtex(SAMPLE, Path::new("self.bib")).unwrap();
        assert_eq!(entries.len(), 2);

        let article = entries.iter().find(|e| e.key() == "weichselbraun2009").unwrap();
        assert_eq!(article.entry_type(), &EntryType::Article);
        assert_eq!(article.year(), "2009");
        assert_eq!(article.title(), "Optimizing NASA Ontology Learning");
        assert_eq!(
            article.raw_fields().get("title").map(String::as_str),
            Some("Optimizing {NASA} Ontology Learning")
        );
        assert_eq!(article.field("author"), Some("Weichselbraun, Albert and Scharl, Arno"));

        let paper = entries.iter().find(|e| e.key() == "scharl2020").unwrap();
        assert_eq!(paper.entry_type(), &EntryType::InProceedings);
        assert_eq!(paper.year_value(), Some(2020));
    }

    #[test]
    fn raw_values_keep_tex_and_declaration_order() {
        let src = r#"
@string{kes = "Knowledge-Based Systems"}

@Conference{c2010,
  title = {Tom \& Jerry},
  pages = {1--10},
  month = jan,
  journal = kes # { Letters},
  author = "Albert Weichselbraun",
}
"#;
        let entries = parse_bibtex(src, Path::new("self.bib")).unwrap();
        let entry = &entries[0];

        assert_eq!(entry.entry_type(), &EntryType::Conference);
        let raw: Vec<(&str, &str)> = entry
            .raw_fields()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            raw,
            [
                ("title", r"Tom \& Jerry"),
                ("pages", "1--10"),
                ("month", "jan"),
                ("journal", "Knowledge-Based Systems Letters"),
                ("author", "Albert Weichselbraun"),
            ]
        );
        assert!(entry
            .bibtex_citation()
            .starts_with("@CONFERENCE{c2010,\n  title = {Tom \\& Jerry},\n  pages = {1--10},"));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = parse_bibtex("@article{x, title = {open", Path::new("bad.bib")).unwrap_err();
        assert!(matches!(err, BibError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_bibtex(Path::new("/nonexistent/self.bib")).unwrap_err();
        assert!(matches!(err, BibError::Read { .. }));
    }
}
