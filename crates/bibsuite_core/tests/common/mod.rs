/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use bibsuite_core::{EntryType, ParsedEntry};
use indexmap::IndexMap;

pub const SELF_BIB: &str = r#"
@article{weichselbraun2009,
  author = {Albert Weichselbraun and Arno Scharl and Astrid Dickinger},
  title = {Optimizing Ontology Learning},
  journal = {Knowledge Engineering},
  volume = {12},
  number = {3},
  year = {2009},
}

@book{scharl2020,
  author = {Scharl, Arno},
  title = {Visual Analytics},
  publisher = {Springer},
  year = {2020},
}
"#;

/// Write `content` to `name` inside `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Build an entry from literal fields.
pub fn make_entry(key: &str, entry_type: EntryType, fields: &[(&str, &str)]) -> ParsedEntry {
    let raw: IndexMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ParsedEntry::new(key, entry_type, raw, "self.bib")
}
