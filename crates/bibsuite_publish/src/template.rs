/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Directory based HTML templates.
//!
//! A template directory holds `head.html` and `foot.html` around the whole
//! listing, and `<type>-head.html`, `<type>-entry.html`, `<type>-foot.html`
//! for every entry type in the configured type order. Fragments are
//! read once when the template is opened, so a template lacking a
//! fragment for one of its types fails there instead of mid-render.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bibsuite_core::EntryType;
use indexmap::IndexMap;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::error::{Result, TemplateError};
use crate::pattern::{format_named, format_value};
use crate::renderable::{EntryLinks, RenderableEntry};

/// Subdirectories created empty in every output tree.
pub const OUTPUT_DIRS: [&str; 3] = ["abstract", "bibtex", "pdf"];
/// Asset directories copied from the template into every output tree.
pub const ASSET_DIRS: [&str; 2] = ["icons", "css"];

#[derive(Debug, Clone)]
struct TypeFragments {
    head: String,
    entry: String,
    foot: String,
}

#[derive(Debug, Clone)]
pub struct Template {
    dir: PathBuf,
    config: TemplateConfig,
    head: String,
    foot: String,
    abstract_fragment: Option<String>,
    fragments: HashMap<EntryType, TypeFragments>,
}

impl Template {
    /// Open the template in `dir`.
    pub fn open(dir: impl AsRef<Path>, fallback_type_order: &[EntryType]) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let config = TemplateConfig::load(&dir, fallback_type_order)?;
        Self::with_config(dir, config)
    }

    /// Open the fragments in `dir` with an explicit configuration.
    pub fn with_config(dir: impl AsRef<Path>, config: TemplateConfig) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let head = read_fragment(&dir, "head.html")?;
        let foot = read_fragment(&dir, "foot.html")?;

        let abstract_path = dir.join("abstract.html");
        let abstract_fragment = if abstract_path.exists() {
            Some(read_fragment(&dir, "abstract.html")?)
        } else {
            None
        };

        let mut fragments = HashMap::new();
        for entry_type in &config.type_order {
            let load = |part: &str| {
                let file = format!("{}-{}.html", entry_type.as_str(), part);
                if !dir.join(&file).is_file() {
                    return Err(TemplateError::MissingFragment {
                        entry_type: entry_type.clone(),
                        file,
                    });
                }
                read_fragment(&dir, &file)
            };
            let set = TypeFragments {
                head: load("head")?,
                entry: load("entry")?,
                foot: load("foot")?,
            };
            fragments.insert(entry_type.clone(), set);
        }

        debug!("opened template {:?} with {} entry types", dir, fragments.len());
        Ok(Self {
            dir,
            config,
            head,
            foot,
            abstract_fragment,
            fragments,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Render the full listing page.
    ///
    /// Entries are grouped by type and emitted in the configured type
    /// order, newest first within a type. Same-year entries come out in
    /// reverse input order. Blacklisted keys and types outside
    /// `restrict_to` are skipped.
    pub fn render_listing(
        &self,
        entries: &[RenderableEntry],
        restrict_to: Option<&[EntryType]>,
    ) -> Result<String> {
        let mut groups: HashMap<&EntryType, Vec<&RenderableEntry>> = HashMap::new();
        for entry in entries {
            if self.config.is_blacklisted(entry.key()) {
                debug!("skipping blacklisted entry {}", entry.key());
                continue;
            }
            groups.entry(entry.entry().entry_type()).or_default().push(entry);
        }

        let mut html = vec![self.head.clone()];
        for entry_type in &self.config.type_order {
            let Some(group) = groups.get(entry_type) else {
                continue;
            };
            if restrict_to.is_some_and(|allowed| !allowed.contains(entry_type)) {
                continue;
            }
            let fragments = self.fragments_for(entry_type)?;

            let mut sorted = group.clone();
            sorted.sort_by(|a, b| a.entry().cmp_by_year(b.entry()));
            sorted.reverse();

            html.push(fragments.head.clone());
            html.extend(sorted.into_iter().map(|e| self.render_entry(&fragments.entry, e)));
            html.push(fragments.foot.clone());
        }
        html.push(self.foot.clone());

        Ok(html.join("\n"))
    }

    /// Render the abstract page of one entry.
    pub fn render_abstract(&self, entry: &RenderableEntry) -> Result<String> {
        let fragment = self
            .abstract_fragment
            .as_ref()
            .ok_or_else(|| TemplateError::MissingAbstract {
                dir: self.dir.clone(),
            })?;

        let mut values = self.entry_values(entry);
        values.insert(
            "citation".to_string(),
            entry.entry().citation().replace('\n', "<br/>"),
        );
        Ok(format_named(fragment, &values))
    }

    /// Attach link HTML to `entry` and, when there is an `eprint`, link
    /// its title.
    ///
    /// Each of `abstract_url`, `url`, `eprint` and `bibtex` known from
    /// the entry's fields or from `links` is formatted through the file
    /// translation table. Entry fields take precedence over same-named
    /// links.
    pub fn set_descriptor(&self, entry: &mut RenderableEntry, links: &EntryLinks) {
        let mut context: IndexMap<String, String> = links.to_map();
        context.extend(
            entry
                .entry()
                .fields()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        let table = &self.config.file_translation;
        let parts: Vec<String> = EntryLinks::ORDER
            .iter()
            .filter(|name| context.contains_key(**name))
            .filter_map(|name| match table.get(*name) {
                Some(pattern) => Some(format_named(pattern, &context)),
                None => {
                    warn!("template has no file translation for '{}'", name);
                    None
                }
            })
            .collect();
        let render_meta = format!(" {} ", parts.join(" "));

        let title = if context.contains_key("eprint") {
            table.get("title").map(|pattern| format_named(pattern, &context))
        } else {
            None
        };

        entry.annotate(render_meta, title);
    }

    /// Delete `dest` and rebuild it as an empty output tree with the
    /// template's assets.
    ///
    /// Everything previously inside `dest` is lost.
    pub fn recreate_output_tree(&self, dest: &Path) -> Result<()> {
        for asset in ASSET_DIRS {
            let src = self.dir.join(asset);
            if !src.is_dir() {
                return Err(TemplateError::MissingAsset { path: src });
            }
        }

        if dest.exists() {
            fs::remove_dir_all(dest).map_err(|source| TemplateError::Write {
                path: dest.to_path_buf(),
                source,
            })?;
        }
        for sub in OUTPUT_DIRS {
            create_dir(&dest.join(sub))?;
        }
        for asset in ASSET_DIRS {
            copy_dir(&self.dir.join(asset), &dest.join(asset))?;
        }
        Ok(())
    }

    fn fragments_for(&self, entry_type: &EntryType) -> Result<&TypeFragments> {
        self.fragments
            .get(entry_type)
            .ok_or_else(|| TemplateError::MissingFragment {
                entry_type: entry_type.clone(),
                file: format!("{}-entry.html", entry_type.as_str()),
            })
    }

    fn render_entry(&self, fragment: &str, entry: &RenderableEntry) -> String {
        let html = format_named(fragment, &self.entry_values(entry));
        html.replace(", ,", ", ").replace(", :", ", ")
    }

    /// The substitution values of one entry.
    fn entry_values(&self, entry: &RenderableEntry) -> IndexMap<String, String> {
        let parsed = entry.entry();
        let mut values: IndexMap<String, String> = parsed
            .fields()
            .iter()
            .map(|(name, value)| (name.clone(), self.config.translate_str(value)))
            .collect();

        if let Some(title) = entry.title_override() {
            values.insert("title".into(), self.config.translate_str(title));
        }
        if parsed.has_field("author") {
            let format = self.config.author_format;
            let author = parsed.author_with(&|name: &str| format.format(name));
            values.insert("author".into(), self.config.translate_str(&author));
        }
        values.insert("key".into(), parsed.key().to_string());
        values.insert("type".into(), parsed.entry_type().to_string());
        values.insert(
            "render_meta".into(),
            self.config.translate_str(entry.render_meta()),
        );

        for name in &self.config.optional_fields {
            let formatted = match values.get(name) {
                None => String::new(),
                Some(value) => match self.config.attr_translation.get(name) {
                    Some(pattern) => format_value(pattern, value),
                    None => continue,
                },
            };
            values.insert(name.clone(), formatted);
        }
        values
    }
}

fn read_fragment(dir: &Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|source| TemplateError::Read { path, source })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| TemplateError::Read {
            path: src.to_path_buf(),
            source: e.into(),
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|source| TemplateError::Write {
                path: target.clone(),
                source,
            })?;
        }
    }
    Ok(())
}
