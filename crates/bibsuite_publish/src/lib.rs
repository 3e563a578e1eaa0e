/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! bibsuite publishing
//!
//! Renders parsed BibTeX entries into a themed HTML tree. A template is a
//! directory of HTML fragments plus translation tables; see
//! [`config::TemplateConfig`] for the configuration format.

pub mod config;
pub mod error;
pub mod pattern;
pub mod publish;
pub mod renderable;
pub mod template;

pub use config::{AuthorFormat, TemplateConfig};
pub use error::{Result, TemplateError};
pub use publish::{PublishReport, Publisher};
pub use renderable::{EntryLinks, RenderableEntry};
pub use template::Template;
