/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use bibsuite_core::{BibError, EntryType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template has no {file} fragment for entry type '{entry_type}'")]
    MissingFragment { entry_type: EntryType, file: String },

    #[error("template {dir:?} has no abstract.html")]
    MissingAbstract { dir: PathBuf },

    #[error("template asset directory {path:?} does not exist")]
    MissingAsset { path: PathBuf },

    #[error("invalid template configuration {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Bib(#[from] BibError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
