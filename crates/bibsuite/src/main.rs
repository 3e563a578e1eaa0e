/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod cli;
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bibsuite_core::io::{find_bib_files, load_bibtex};
use bibsuite_core::{Cache, EntryType, ParsedEntry, PdfSearch};
use bibsuite_publish::{Publisher, Template};
use clap::Parser;
use cli::{Cli, Command};
use config::{expand_home, Config, OutputFormat, UserDirs};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibsuite=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let dirs = match cli.config_dir {
        Some(root) => UserDirs::new(root),
        None => UserDirs::locate()?,
    };

    match cli.command {
        Command::Publish {
            output_dir,
            template,
            template_path,
            input,
            types,
            list,
        } => {
            let config = Config::load_or_create(&dirs)?;
            let cache = Cache::new(dirs.cache_dir());

            let mut files: Vec<PathBuf> =
                config.publish.files.iter().map(|f| expand_home(f)).collect();
            files.extend(input);
            let entries = load_entries(&cache, &files)?;

            let restrict: Vec<EntryType> = if types.is_empty() {
                config.publish.types.clone()
            } else {
                types.into_iter().map(EntryType::from).collect()
            };
            let restrict = (!restrict.is_empty()).then_some(restrict);

            if list {
                for entry in &entries {
                    if restrict.as_ref().map_or(true, |r| r.contains(entry.entry_type())) {
                        println!("{}", entry.key());
                    }
                }
                return Ok(());
            }

            let template_root = template_path
                .or_else(|| config.publish.template_path.as_deref().map(expand_home))
                .unwrap_or_else(|| dirs.templates_dir());
            let template_dir =
                template_root.join(template.unwrap_or_else(|| config.publish.template.clone()));
            let template = Template::open(&template_dir, &config.publish.type_order)
                .with_context(|| format!("failed to open template {:?}", template_dir))?;

            let pdf_roots: Vec<PathBuf> = config
                .publish
                .pdf_search_path
                .iter()
                .map(|p| expand_home(p))
                .collect();
            let pdf_search = if pdf_roots.is_empty() {
                None
            } else {
                Some(PdfSearch::new(&pdf_roots)?)
            };

            let dest = output_dir.unwrap_or_else(|| expand_home(&config.publish.output_dir));
            let report = Publisher::new(template, pdf_search)
                .publish(&dest, entries, restrict.as_deref())
                .with_context(|| format!("failed to publish to {:?}", dest))?;
            println!("{} entries published to {}", report.entries, dest.display());
        }
        Command::Search {
            format,
            path,
            terms,
        } => {
            let config = Config::load_or_create(&dirs)?;
            let cache = Cache::new(dirs.cache_dir());
            let format = format.selected().unwrap_or(config.search.output_format);

            let mut search_path: Vec<PathBuf> = config
                .search
                .bib_search_path
                .iter()
                .map(|p| expand_home(p))
                .collect();
            search_path.extend(path);

            let mut files = Vec::new();
            for dir in &search_path {
                match find_bib_files(dir) {
                    Ok(found) => files.extend(found),
                    Err(e) => warn!("skipping search path {:?}: {}", dir, e),
                }
            }

            let matches: Vec<ParsedEntry> = load_entries(&cache, &files)?
                .into_iter()
                .filter(|entry| entry.contains(&terms))
                .collect();
            for entry in &matches {
                println!("{}", render(entry, format));
            }
            println!("({} entries found)", matches.len());
        }
        Command::TexFinalize { file } => {
            let document = bibsuite_tex::finalize(&file)
                .with_context(|| format!("failed to finalize {:?}", file))?;
            print!("{}", document);
        }
        Command::TexLabels { file } => {
            let labels = bibsuite_tex::read_labels(&file)?;
            print!("{}", bibsuite_tex::format_groups(&bibsuite_tex::group_labels(&labels)));
        }
    }

    Ok(())
}

/// Parse every file through the cache.
fn load_entries(cache: &Cache, files: &[PathBuf]) -> Result<Vec<ParsedEntry>> {
    let mut entries = Vec::new();
    for file in files {
        let loaded: Vec<ParsedEntry> = cache
            .retrieve(file, |path: &Path| load_bibtex(path))
            .with_context(|| format!("failed to load {:?}", file))?;
        entries.extend(loaded);
    }
    Ok(entries)
}

fn render(entry: &ParsedEntry, format: OutputFormat) -> String {
    match format {
        OutputFormat::Citation => entry.citation(),
        OutputFormat::Wikipedia => entry.wikipedia_citation(),
        OutputFormat::Bibtex => entry.bibtex_citation(),
        OutputFormat::Coins => entry.coins_citation(),
    }
}
