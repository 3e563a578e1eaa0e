/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! bibsuite core
//!
//! The bibliographic data model shared by the bibsuite tools: author name
//! handling, the parsed BibTeX entry with its derived citation forms, a
//! loader built on the `biblatex` parser, the parse cache, and PDF lookup.
//!
//! # Example
//!
//! ```rust
//! use bibsuite_core::io::parse_bibtex;
//! use std::path::Path;
//!
//! let src = "@article{kuhn1962, author = {Thomas Kuhn}, title = {Structure}, year = {1962}}";
//! let entries = parse_bibtex(src, Path::new("refs.bib")).unwrap();
//! assert_eq!(entries[0].author(), "Kuhn, Thomas");
//! assert_eq!(entries[0].ieee_filename(), "Kuhn-Structure1962");
//! ```

pub mod cache;
pub mod entry;
pub mod error;
pub mod io;
pub mod names;
pub mod pdf;

pub use cache::Cache;
pub use entry::{EntryType, ParsedEntry};
pub use error::{BibError, Result};
pub use names::NameList;
pub use pdf::PdfSearch;
