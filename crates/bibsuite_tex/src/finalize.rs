/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Flattening LaTeX documents for submission.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, TexError};

const DRAFT_MODE: &str = r"\def\mode{0} %";
const FINAL_MODE: &str = r"\def\mode{1} %";

static INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\input\{([^}]+)\}").expect("invalid input pattern"));

/// `\newlabel{fig:X}{{N}...` lines of an `.aux` file.
static FIGURE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"newlabel\{fig:(\S+?)\}\{\{(\d+)\}").expect("invalid figure label pattern")
});

/// Flatten the document at `path`.
pub fn finalize(path: impl AsRef<Path>) -> Result<String> {
    Finalizer::new(path).finalize()
}

/// Inlines a document's inputs and bibliography.
///
/// Figure numbers read from every `.aux` file encountered stay known for
/// the rest of the run, so a figure labelled in the main document can
/// be referenced from an included one.
pub struct Finalizer {
    root: PathBuf,
    figures: BTreeMap<String, String>,
    open: Vec<PathBuf>,
}

impl Finalizer {
    /// A finalizer for the document at `root`. A root without extension
    /// that does not exist refers to `<root>.tex`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: with_tex_extension(root.as_ref()),
            figures: BTreeMap::new(),
            open: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Figure references resolved so far, `\ref{fig:X}` to number.
    pub fn figures(&self) -> &BTreeMap<String, String> {
        &self.figures
    }

    pub fn finalize(&mut self) -> Result<String> {
        let root = self.root.clone();
        self.read_file(&root)
    }

    fn read_file(&mut self, path: &Path) -> Result<String> {
        let path = with_tex_extension(path);
        let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.open.contains(&identity) {
            return Err(TexError::IncludeCycle { path });
        }

        self.read_aux(&path)?;
        let content = fs::read_to_string(&path).map_err(|source| TexError::Read {
            path: path.clone(),
            source,
        })?;
        debug!("finalizing {:?}", path);

        self.open.push(identity);
        let result = self.process(&path, &content);
        self.open.pop();
        result
    }

    fn process(&mut self, path: &Path, content: &str) -> Result<String> {
        let mut out = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            if line.starts_with('%') || line.starts_with(r"\bibliographystyle") {
                continue;
            }
            if line.starts_with(r"\bibliography") {
                let bbl = self.root.with_extension("bbl");
                out.push_str(&self.read_file(&bbl)?);
                continue;
            }

            let line = self.replace_items(line);
            out.push_str(&self.expand_inputs(path, &line)?);
        }
        Ok(out)
    }

    fn replace_items(&self, line: &str) -> String {
        let line = line.replace(DRAFT_MODE, FINAL_MODE);
        self.figures
            .iter()
            .fold(line, |acc, (reference, number)| acc.replace(reference.as_str(), number))
    }

    /// Replace every `\input{X}` in `line` with the finalized content of X,
    /// resolved against the directory of `path`.
    fn expand_inputs(&mut self, path: &Path, line: &str) -> Result<String> {
        let inputs: Vec<(usize, usize, String)> = INPUT
            .captures_iter(line)
            .filter_map(|cap| {
                let whole = cap.get(0)?;
                let name = cap.get(1)?;
                Some((whole.start(), whole.end(), name.as_str().to_string()))
            })
            .collect();
        if inputs.is_empty() {
            return Ok(line.to_string());
        }

        let base = path.parent().unwrap_or(Path::new(""));
        let mut out = String::new();
        let mut last = 0;
        for (start, end, name) in inputs {
            out.push_str(&line[last..start]);
            out.push_str(&self.read_file(&base.join(name.trim()))?);
            last = end;
        }
        out.push_str(&line[last..]);
        Ok(out)
    }

    fn read_aux(&mut self, path: &Path) -> Result<()> {
        let aux = path.with_extension("aux");
        if !aux.is_file() {
            return Ok(());
        }
        let content = fs::read_to_string(&aux).map_err(|source| TexError::Read {
            path: aux.clone(),
            source,
        })?;
        for cap in FIGURE_LABEL.captures_iter(&content) {
            self.figures
                .insert(format!(r"\ref{{fig:{}}}", &cap[1]), cap[2].to_string());
        }
        debug!("{} figure references known after {:?}", self.figures.len(), aux);
        Ok(())
    }
}

fn with_tex_extension(path: &Path) -> PathBuf {
    if path.extension().is_none() && !path.exists() {
        path.with_extension("tex")
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_switch_and_figure_references() {
        let mut finalizer = Finalizer::new("paper");
        finalizer.figures.insert(r"\ref{fig:arch}".into(), "3".into());
        let line = finalizer.replace_items("\\def\\mode{0} % draft\nsee Figure~\\ref{fig:arch}.\n");
        assert_eq!(line, "\\def\\mode{1} % draft\nsee Figure~3.\n");
    }

    #[test]
    fn missing_extension_defaults_to_tex() {
        assert_eq!(
            with_tex_extension(Path::new("/nonexistent/paper")),
            Path::new("/nonexistent/paper.tex")
        );
        assert_eq!(with_tex_extension(Path::new("paper.ltx")), Path::new("paper.ltx"));
    }
}
