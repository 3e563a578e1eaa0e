/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use bibsuite_core::ParsedEntry;
use indexmap::IndexMap;

/// A parsed entry annotated for rendering.
///
/// `render_meta` holds the link HTML shown next to the entry and
/// `title_override` the hyperlinked title. Both are written only by
/// [`crate::Template::set_descriptor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableEntry {
    entry: ParsedEntry,
    render_meta: String,
    title_override: Option<String>,
}

impl RenderableEntry {
    pub fn new(entry: ParsedEntry) -> Self {
        Self {
            entry,
            render_meta: String::new(),
            title_override: None,
        }
    }

    pub fn entry(&self) -> &ParsedEntry {
        &self.entry
    }

    pub fn key(&self) -> &str {
        self.entry.key()
    }

    pub fn render_meta(&self) -> &str {
        &self.render_meta
    }

    pub fn title_override(&self) -> Option<&str> {
        self.title_override.as_deref()
    }

    /// The title to display: the override if one was set.
    pub fn title(&self) -> &str {
        self.title_override
            .as_deref()
            .unwrap_or_else(|| self.entry.title())
    }

    pub(crate) fn annotate(&mut self, render_meta: String, title_override: Option<String>) {
        self.render_meta = render_meta;
        self.title_override = title_override;
    }
}

impl From<ParsedEntry> for RenderableEntry {
    fn from(entry: ParsedEntry) -> Self {
        Self::new(entry)
    }
}

/// Optional resources linked from an entry in the listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryLinks {
    pub abstract_url: Option<String>,
    pub url: Option<String>,
    pub eprint: Option<String>,
    pub bibtex: Option<String>,
}

impl EntryLinks {
    /// Link names in the order they appear in the rendered metadata.
    pub const ORDER: [&'static str; 4] = ["abstract_url", "url", "eprint", "bibtex"];

    pub fn to_map(&self) -> IndexMap<String, String> {
        [
            ("abstract_url", &self.abstract_url),
            ("url", &self.url),
            ("eprint", &self.eprint),
            ("bibtex", &self.bibtex),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
    }
}
