/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BibError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("BibTeX parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to search {path:?} for PDF files: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BibError>;
