/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Author name normalization and list joining.
//!
//! Names are kept internally in "Last, First" form. BibTeX allows both
//! "First Last" and "Last, First", so everything read from an `author`
//! field passes through [`normalize`] first.

use serde::{Deserialize, Serialize};

/// Convert a name into "Surname, Given Names" form.
///
/// Names that already carry a comma are returned unchanged, as are
/// single-token names (there is no given-name part to move).
pub fn normalize(name: &str) -> String {
    let name = name.trim();
    if name.contains(',') {
        return name.to_string();
    }

    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.split_last() {
        None => String::new(),
        Some((surname, [])) => surname.to_string(),
        Some((surname, given)) => format!("{}, {}", surname, given.join(" ")),
    }
}

/// Convert a "Surname, Given Names" name back into "Given Names Surname".
pub fn to_first_last(name: &str) -> String {
    match name.split_once(',') {
        None => name.to_string(),
        Some((surname, given)) => {
            let (surname, given) = (surname.trim(), given.trim());
            if given.is_empty() {
                surname.to_string()
            } else {
                format!("{} {}", given, surname)
            }
        }
    }
}

/// Join names as "A, B and C".
///
/// `formatter` is applied to every name first; without one the names
/// are used as given. A single name comes back verbatim.
pub fn join_authors<S: AsRef<str>>(
    names: &[S],
    formatter: Option<&dyn Fn(&str) -> String>,
) -> String {
    let formatted: Vec<String> = names
        .iter()
        .map(|n| match formatter {
            Some(f) => f(n.as_ref()),
            None => n.as_ref().to_string(),
        })
        .collect();

    match formatted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{} and {}", init.join(", "), last),
    }
}

/// An ordered author roster, normalized to "Last, First".
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Parse a BibTeX `author`/`editor` value (names separated by `and`).
    pub fn parse(field: &str) -> Self {
        let names = split_and(field)
            .into_iter()
            .map(normalize)
            .filter(|n| !n.is_empty())
            .collect();
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Surname of the first author, i.e. the text before its first comma.
    pub fn first_author_surname(&self) -> String {
        self.0
            .first()
            .map(|n| n.split(',').next().unwrap_or_default().trim().to_string())
            .unwrap_or_default()
    }

    /// Given names of the first author, empty for bare single names.
    pub fn first_author_given(&self) -> String {
        self.0
            .first()
            .and_then(|n| n.split_once(','))
            .map(|(_, given)| given.trim().to_string())
            .unwrap_or_default()
    }

    pub fn join(&self, formatter: Option<&dyn Fn(&str) -> String>) -> String {
        join_authors(&self.0, formatter)
    }

    /// The roster as a BibTeX-style `and`-separated value.
    pub fn to_field(&self) -> String {
        self.0.join(" and ")
    }
}

/// Split on the word `and`, tolerating runs of whitespace and newlines
/// around it.
fn split_and(field: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = field;
    loop {
        match find_and(rest) {
            Some((start, end)) => {
                parts.push(rest[..start].trim());
                rest = &rest[end..];
            }
            None => {
                parts.push(rest.trim());
                break;
            }
        }
    }
    parts
}

fn find_and(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while let Some(pos) = s[i..].find("and") {
        let start = i + pos;
        let end = start + 3;
        let before = start > 0 && bytes[start - 1].is_ascii_whitespace();
        let after = end < bytes.len() && bytes[end].is_ascii_whitespace();
        if before && after {
            let ws_start = s[..start].trim_end().len();
            let ws_end = end + (s[end..].len() - s[end..].trim_start().len());
            return Some((ws_start, ws_end));
        }
        i = end;
    }
    None
}
