/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Listing the labels of a LaTeX document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TexError};

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\label\{([^}]+)\}").expect("invalid label pattern"));

/// Group names by label qualifier (`sec:intro` is a section).
const GROUPS: [(&str, &str); 4] = [
    ("sec", "Sections"),
    ("eq", "Equations"),
    ("fig", "Figures"),
    ("tab", "Tables"),
];

const UNKNOWN: &str = "Unknown";

/// All `\label{...}` names in `text`, in document order.
pub fn extract_labels(text: &str) -> Vec<String> {
    LABEL
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Labels of the file at `path`.
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| TexError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_labels(&text))
}

/// Group labels by qualifier. Labels without a known qualifier land in
/// `Unknown`; every group is sorted.
pub fn group_labels<S: AsRef<str>>(labels: &[S]) -> BTreeMap<&'static str, Vec<String>> {
    let mut groups: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for label in labels {
        let label = label.as_ref();
        let qualifier = label.split_once(':').map(|(q, _)| q).unwrap_or("");
        let group = GROUPS
            .iter()
            .find(|(q, _)| *q == qualifier)
            .map(|(_, name)| *name)
            .unwrap_or(UNKNOWN);
        groups.entry(group).or_default().push(label.to_string());
    }
    for labels in groups.values_mut() {
        labels.sort();
    }
    groups
}

/// Print form: `GROUP:` followed by the labels indented by two spaces.
pub fn format_groups(groups: &BTreeMap<&'static str, Vec<String>>) -> String {
    let mut out = String::new();
    for (group, labels) in groups {
        out.push_str(&group.to_uppercase());
        out.push_str(":\n");
        for label in labels {
            out.push_str("  ");
            out.push_str(label);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_in_document_order() {
        let text = "\\section{Intro}\\label{sec:intro}\n\\begin{equation}\\label{eq:1}x\\end{equation}\n";
        assert_eq!(extract_labels(text), vec!["sec:intro", "eq:1"]);
    }

    #[test]
    fn grouping_by_qualifier() {
        let groups = group_labels(&["tab:b", "sec:z", "tab:a", "thm:x", "plain", "sec:a"]);
        assert_eq!(groups["Sections"], vec!["sec:a", "sec:z"]);
        assert_eq!(groups["Tables"], vec!["tab:a", "tab:b"]);
        assert_eq!(groups["Unknown"], vec!["plain", "thm:x"]);
        assert!(!groups.contains_key("Figures"));
    }

    #[test]
    fn print_form() {
        let groups = group_labels(&["fig:b", "fig:a", "eq:e"]);
        assert_eq!(
            format_groups(&groups),
            "EQUATIONS:\n  eq:e\nFIGURES:\n  fig:a\n  fig:b\n"
        );
    }
}
