/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! User preferences in `~/.bibsuite`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bibsuite_core::EntryType;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const PREF_DIR: &str = ".bibsuite";
pub const CONFIG_FILE: &str = "config.toml";

/// The preferences directory and its well-known children.
#[derive(Debug, Clone)]
pub struct UserDirs {
    root: PathBuf,
}

impl UserDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.bibsuite`.
    pub fn locate() -> Result<Self> {
        let home = dirs::home_dir().context("cannot determine the home directory")?;
        Ok(Self::new(home.join(PREF_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PublishConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_template")]
    pub template: String,

    /// Defaults to the `templates` directory of the preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,

    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub pdf_search_path: Vec<String>,

    /// Used by templates that do not name their own type order.
    #[serde(default = "default_type_order")]
    pub type_order: Vec<EntryType>,

    /// Types to list; empty lists every type of the type order.
    #[serde(default)]
    pub types: Vec<EntryType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchConfig {
    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default = "default_bib_search_path")]
    pub bib_search_path: Vec<String>,
}

/// How search results are printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Citation,
    Wikipedia,
    Bibtex,
    Coins,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template: default_template(),
            template_path: None,
            files: Vec::new(),
            pdf_search_path: Vec::new(),
            type_order: default_type_order(),
            types: Vec::new(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            bib_search_path: default_bib_search_path(),
        }
    }
}

fn default_output_dir() -> String {
    "~/Public/publications".to_string()
}

fn default_template() -> String {
    "default".to_string()
}

fn default_type_order() -> Vec<EntryType> {
    [
        "book",
        "article",
        "incollection",
        "inproceedings",
        "unpublished",
        "phdthesis",
        "mastersthesis",
    ]
    .into_iter()
    .map(EntryType::from)
    .collect()
}

fn default_bib_search_path() -> Vec<String> {
    vec!["~".to_string()]
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load the user configuration, creating the preferences directory
    /// with a default configuration on first use.
    pub fn load_or_create(dirs: &UserDirs) -> Result<Self> {
        for dir in [dirs.root().to_path_buf(), dirs.cache_dir(), dirs.templates_dir()] {
            fs::create_dir_all(&dir).with_context(|| format!("failed to create {:?}", dir))?;
        }

        let path = dirs.config_file();
        if !path.exists() {
            info!("writing default configuration to {:?}", path);
            Self::default().save(&path)?;
        }
        Self::load(&path).with_context(|| format!("invalid configuration {:?}", path))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => expand_with(path, &home),
        None => PathBuf::from(path),
    }
}

fn expand_with(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
