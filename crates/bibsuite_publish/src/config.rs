/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Per-template configuration.
//!
//! A template directory carries a `templateconfig.toml`:
//!
//! ```toml
//! type-order = ["article", "inproceedings", "book"]
//! blacklist = ["draft2010"]
//! author-format = "first-last"
//!
//! [attr-translation]
//! booktitle = " %s"
//! number = "(%s):"
//!
//! [str-translation]
//! "\\&" = "&amp;"
//!
//! [file-translation]
//! bibtex = '<a href="%(bibtex)s">BibTeX</a>'
//! title = '<a href="%(eprint)s">%(title)s</a>'
//! ```
//!
//! Older templates ship three two-column CSV files instead (`attr.csv`,
//! `str.csv`, `files.csv`) and take their type order from the user
//! configuration.

use std::fs;
use std::path::Path;

use bibsuite_core::names::to_first_last;
use bibsuite_core::EntryType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemplateError};

pub const CONFIG_FILE: &str = "templateconfig.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Entry types to render, in output order.
    #[serde(default)]
    pub type_order: Vec<EntryType>,

    /// `%s` patterns applied to optional fields that are present.
    #[serde(default)]
    pub attr_translation: IndexMap<String, String>,

    /// Literal replacements applied, in order, to every field value.
    #[serde(default)]
    pub str_translation: IndexMap<String, String>,

    /// `%(name)s` patterns for entry links and the linked title.
    #[serde(default)]
    pub file_translation: IndexMap<String, String>,

    /// Keys never rendered.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Fields defaulted to the empty string when an entry lacks them.
    #[serde(default = "default_optional_fields")]
    pub optional_fields: Vec<String>,

    #[serde(default)]
    pub author_format: AuthorFormat,
}

/// How author names appear in rendered fragments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorFormat {
    #[default]
    LastFirst,
    FirstLast,
}

impl AuthorFormat {
    pub fn format(self, name: &str) -> String {
        match self {
            AuthorFormat::LastFirst => name.to_string(),
            AuthorFormat::FirstLast => to_first_last(name),
        }
    }
}

fn default_optional_fields() -> Vec<String> {
    [
        "editor",
        "pages",
        "journal",
        "address",
        "volume",
        "number",
        "booktitle",
        "render_meta",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            type_order: Vec::new(),
            attr_translation: IndexMap::new(),
            str_translation: IndexMap::new(),
            file_translation: IndexMap::new(),
            blacklist: Vec::new(),
            optional_fields: default_optional_fields(),
            author_format: AuthorFormat::default(),
        }
    }
}

impl TemplateConfig {
    /// Load the configuration of the template in `dir`.
    ///
    /// `fallback_type_order` applies when the template does not name its
    /// own type order, which is always the case for CSV templates.
    pub fn load(dir: &Path, fallback_type_order: &[EntryType]) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str::<TemplateConfig>(&content).map_err(|e| TemplateError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            Self::load_legacy(dir)?
        };

        if config.type_order.is_empty() {
            config.type_order = fallback_type_order.to_vec();
        }
        Ok(config)
    }

    fn load_legacy(dir: &Path) -> Result<Self> {
        Ok(Self {
            attr_translation: read_table(&dir.join("attr.csv"))?,
            str_translation: read_table(&dir.join("str.csv"))?,
            file_translation: read_table(&dir.join("files.csv"))?,
            ..Default::default()
        })
    }

    pub fn is_blacklisted(&self, key: &str) -> bool {
        self.blacklist.iter().any(|k| k == key)
    }

    /// Apply every string translation to `value`.
    pub fn translate_str(&self, value: &str) -> String {
        self.str_translation
            .iter()
            .fold(value.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }
}

/// Read a two-column CSV translation table. Rows with fewer than two
/// columns are ignored.
fn read_table(path: &Path) -> Result<IndexMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TemplateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut table = IndexMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| TemplateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if let (Some(key), Some(value)) = (record.get(0), record.get(1)) {
            table.insert(key.to_string(), value.to_string());
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_keeps_table_order() {
        let config: TemplateConfig = toml::from_str(
            r#"
type-order = ["unpublished", "article"]
author-format = "first-last"

[str-translation]
"--" = "&ndash;"
"-" = "&#8209;"

[attr-translation]
booktitle = " %s"
"#,
        )
        .unwrap();

        assert_eq!(
            config.type_order,
            vec![EntryType::Unpublished, EntryType::Article]
        );
        assert_eq!(config.author_format, AuthorFormat::FirstLast);
        assert_eq!(config.translate_str("1--2"), "1&ndash;2");
        assert_eq!(config.translate_str("a-b"), "a&#8209;b");
        assert_eq!(config.optional_fields.len(), 8);
        assert!(config.file_translation.is_empty());
    }

    #[test]
    fn legacy_csv_tables() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("attr.csv"), "booktitle,\" %s\"\nvolume, %s\n").unwrap();
        fs::write(dir.path().join("str.csv"), "\\&,&amp;\n").unwrap();
        fs::write(dir.path().join("files.csv"), "title,%(title)s\nbroken\n").unwrap();

        let config = TemplateConfig::load(dir.path(), &[EntryType::Book]).unwrap();
        assert_eq!(config.type_order, vec![EntryType::Book]);
        assert_eq!(config.attr_translation["booktitle"], " %s");
        assert_eq!(config.attr_translation["volume"], " %s");
        assert_eq!(config.translate_str("A \\& B"), "A &amp; B");
        assert_eq!(config.file_translation.len(), 1);
    }

    #[test]
    fn missing_tables_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TemplateConfig::load(dir.path(), &[]).is_err());
    }
}
