/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use bibsuite_core::{EntryType, ParsedEntry};
use bibsuite_publish::RenderableEntry;
use indexmap::IndexMap;

pub const TEMPLATE_CONFIG: &str = r#"
type-order = ["article", "book"]
blacklist = ["hidden2001"]
author-format = "first-last"

[attr-translation]
booktitle = "In %s."
number = "(%s):"

[str-translation]
"\\&" = "&amp;"

[file-translation]
abstract_url = '<a href="%(abstract_url)s">abstract</a>'
url = '<a href="%(url)s">www</a>'
eprint = '<a href="%(eprint)s">pdf</a>'
bibtex = '<a href="%(bibtex)s">bib</a>'
title = '<a href="%(eprint)s">%(title)s</a>'
"#;

/// Write a complete template into `dir`.
pub fn write_template(dir: &Path) {
    let files = [
        ("head.html", "<html>"),
        ("foot.html", "</html>"),
        ("article-head.html", "<h2>Articles</h2>"),
        (
            "article-entry.html",
            "<li id=\"%(key)s\">%(author)s (%(year)s). %(title)s, %(journal)s,%(booktitle)s%(number)s%(render_meta)s</li>",
        ),
        ("article-foot.html", "<!-- articles -->"),
        ("book-head.html", "<h2>Books</h2>"),
        ("book-entry.html", "<li id=\"%(key)s\">%(title)s</li>"),
        ("book-foot.html", "<!-- books -->"),
        (
            "abstract.html",
            "<h1>%(title)s</h1><p>%(abstract)s</p><p>%(citation)s</p>",
        ),
        ("templateconfig.toml", TEMPLATE_CONFIG),
        ("icons/pdf.png", "png"),
        ("icons/small/bib.png", "png"),
        ("css/style.css", "body {}"),
    ];
    for (name, content) in files {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

pub fn make_entry(key: &str, entry_type: EntryType, fields: &[(&str, &str)]) -> ParsedEntry {
    let raw: IndexMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ParsedEntry::new(key, entry_type, raw, "/home/albert/self.bib")
}

pub fn article(key: &str, year: &str) -> RenderableEntry {
    make_entry(
        key,
        EntryType::Article,
        &[
            ("author", "Albert Weichselbraun"),
            ("title", key),
            ("year", year),
        ],
    )
    .into()
}
