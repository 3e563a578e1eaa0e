/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Lookup of companion PDF files for entries.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::entry::ParsedEntry;
use crate::error::{BibError, Result};

/// A snapshot of every PDF file below a set of search roots.
#[derive(Debug, Clone, Default)]
pub struct PdfSearch {
    files: Vec<PathBuf>,
}

impl PdfSearch {
    /// Walk `roots` once and remember all `.pdf` files found.
    ///
    /// Roots that do not exist are skipped.
    pub fn new<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let mut files = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if !root.exists() {
                debug!("skipping missing PDF search root {:?}", root);
                continue;
            }
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|e| BibError::Walk {
                    path: root.to_path_buf(),
                    message: e.to_string(),
                })?;
                if entry.file_type().is_file() && is_pdf(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }
        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// The first PDF named after the entry's IEEE file name, ignoring case.
    pub fn search(&self, entry: &ParsedEntry) -> Option<&Path> {
        let wanted = format!("{}.pdf", entry.ieee_filename()).to_lowercase();
        self.files
            .iter()
            .find(|f| {
                f.file_name()
                    .map(|n| n.to_string_lossy().to_lowercase() == wanted)
                    .unwrap_or(false)
            })
            .map(PathBuf::as_path)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
