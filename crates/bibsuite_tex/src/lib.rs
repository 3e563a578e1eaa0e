/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! LaTeX helpers for publishing papers.
//!
//! [`finalize`] flattens a document into a single self-contained source:
//! `\input` files are inlined, the generated bibliography replaces the
//! `\bibliography` command and figure references are resolved from the
//! `.aux` file. [`labels`] lists the labels a document defines.

pub mod error;
pub mod finalize;
pub mod labels;

pub use error::{Result, TexError};
pub use finalize::{finalize, Finalizer};
pub use labels::{extract_labels, format_groups, group_labels, read_labels};
