/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Writing a complete publication tree.

use std::fs;
use std::path::{Path, PathBuf};

use bibsuite_core::{EntryType, ParsedEntry, PdfSearch};
use tracing::{debug, info};

use crate::error::{Result, TemplateError};
use crate::renderable::{EntryLinks, RenderableEntry};
use crate::template::Template;

/// Counts of what a publish run wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    pub entries: usize,
    pub abstracts: usize,
    pub pdfs: usize,
}

pub struct Publisher {
    template: Template,
    pdf_search: Option<PdfSearch>,
}

impl Publisher {
    pub fn new(template: Template, pdf_search: Option<PdfSearch>) -> Self {
        Self {
            template,
            pdf_search,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Publish `entries` into `dest`, replacing whatever it held.
    ///
    /// Every entry gets `bibtex/<key>.bib`; entries with an abstract get
    /// `abstract/<key>.html`; a PDF found by the search is copied into
    /// `pdf/` and linked as the entry's eprint. The listing is written to
    /// `index.html` last.
    pub fn publish(
        &self,
        dest: &Path,
        entries: Vec<ParsedEntry>,
        restrict_to: Option<&[EntryType]>,
    ) -> Result<PublishReport> {
        self.template.recreate_output_tree(dest)?;
        let mut report = PublishReport::default();

        let mut renderable = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut entry = RenderableEntry::new(entry);
            let stem = file_stem(entry.key());
            let mut links = EntryLinks::default();

            let bibtex = format!("bibtex/{}.bib", stem);
            write(&dest.join(&bibtex), &entry.entry().bibtex_citation())?;
            links.bibtex = Some(bibtex);

            if entry.entry().has_field("abstract") {
                let abstract_url = format!("abstract/{}.html", stem);
                write(
                    &dest.join(&abstract_url),
                    &self.template.render_abstract(&entry)?,
                )?;
                links.abstract_url = Some(abstract_url);
                report.abstracts += 1;
            }

            if let Some(pdf) = self.find_pdf(entry.entry()) {
                let name = pdf.file_name().unwrap_or_default().to_string_lossy().to_string();
                let target = format!("pdf/{}", name);
                fs::copy(&pdf, dest.join(&target)).map_err(|source| TemplateError::Write {
                    path: dest.join(&target),
                    source,
                })?;
                debug!("attached {:?} to {}", pdf, entry.key());
                links.eprint = Some(target);
                report.pdfs += 1;
            }

            self.template.set_descriptor(&mut entry, &links);
            renderable.push(entry);
            report.entries += 1;
        }

        let index = self.template.render_listing(&renderable, restrict_to)?;
        write(&dest.join("index.html"), &index)?;

        info!(
            "published {} entries ({} abstracts, {} PDFs) to {:?}",
            report.entries, report.abstracts, report.pdfs, dest
        );
        Ok(report)
    }

    fn find_pdf(&self, entry: &ParsedEntry) -> Option<PathBuf> {
        self.pdf_search
            .as_ref()
            .and_then(|s| s.search(entry))
            .map(Path::to_path_buf)
    }
}

/// An entry key usable as a file name.
pub fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
