/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(name = "bibsuite", author, version)]
#[command(about = "Publish, search and finalize BibTeX bibliographies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Preferences directory (default: ~/.bibsuite)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render BibTeX files into an HTML publication list
    Publish {
        /// Output directory; its previous content is deleted
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Template name within the template path
        #[arg(short, long)]
        template: Option<String>,

        /// Directory holding the templates
        #[arg(long)]
        template_path: Option<PathBuf>,

        /// Additional BibTeX files to publish
        #[arg(short, long = "input")]
        input: Vec<PathBuf>,

        /// Only list entries of this type (repeatable)
        #[arg(long = "type")]
        types: Vec<String>,

        /// Print the keys of the entries instead of rendering them
        #[arg(long)]
        list: bool,
    },

    /// Search the BibTeX files of the search path
    Search {
        #[command(flatten)]
        format: FormatFlags,

        /// Additional directories to search
        #[arg(short, long = "path")]
        path: Vec<PathBuf>,

        /// Terms every matching entry contains
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Inline inputs and the bibliography of a LaTeX document
    TexFinalize { file: PathBuf },

    /// List the labels of a LaTeX document by kind
    TexLabels { file: PathBuf },
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct FormatFlags {
    /// Print BibTeX snippets
    #[arg(short, long)]
    pub bibtex: bool,

    /// Print plain citations
    #[arg(short, long)]
    pub citation: bool,

    /// Print Wikipedia citations
    #[arg(short, long)]
    pub wikipedia: bool,

    /// Print COinS spans
    #[arg(long)]
    pub coins: bool,
}

impl FormatFlags {
    /// The selected format, if any flag was given.
    pub fn selected(&self) -> Option<OutputFormat> {
        [
            (self.bibtex, OutputFormat::Bibtex),
            (self.citation, OutputFormat::Citation),
            (self.wikipedia, OutputFormat::Wikipedia),
            (self.coins, OutputFormat::Coins),
        ]
        .into_iter()
        .find_map(|(set, format)| set.then_some(format))
    }
}
