/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The printf-style substitution language used by templates.
//!
//! Attribute patterns take a single value through `%s`; fragments and
//! file patterns pull named values through `%(name)s`. `%%` is a
//! literal percent sign. Any other `%` sequence is copied unchanged.

use indexmap::IndexMap;

/// Substitute `value` for every `%s` in `pattern`.
pub fn format_value(pattern: &str, value: &str) -> String {
    substitute(pattern, |_| None, Some(value))
}

/// Substitute `%(name)s` placeholders from `values`; unknown names
/// become the empty string.
pub fn format_named(pattern: &str, values: &IndexMap<String, String>) -> String {
    substitute(pattern, |name| Some(values.get(name).map(String::as_str).unwrap_or("")), None)
}

fn substitute<'a, F>(pattern: &str, named: F, positional: Option<&str>) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("%%") {
            out.push('%');
            rest = &tail[2..];
        } else if tail.starts_with("%s") && positional.is_some() {
            out.push_str(positional.unwrap_or_default());
            rest = &tail[2..];
        } else if let Some((name, len)) = named_placeholder(tail) {
            match named(name) {
                Some(value) => {
                    out.push_str(value);
                    rest = &tail[len..];
                }
                None => {
                    out.push('%');
                    rest = &tail[1..];
                }
            }
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Parse `%(name)s` at the start of `s`, returning the name and the
/// placeholder length.
fn named_placeholder(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix("%(")?;
    let close = inner.find(')')?;
    if !inner[close + 1..].starts_with('s') {
        return None;
    }
    Some((&inner[..close], close + 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn positional() {
        assert_eq!(format_value(" %s", "Proceedings"), " Proceedings");
        assert_eq!(format_value("(%s):", "3"), "(3):");
        assert_eq!(format_value("100%% %s", "x"), "100% x");
        assert_eq!(format_value("no placeholder", "x"), "no placeholder");
    }

    #[test]
    fn named() {
        let v = values(&[("title", "Ontologies"), ("eprint", "pdf/a.pdf")]);
        assert_eq!(
            format_named(r#"<a href="%(eprint)s">%(title)s</a>"#, &v),
            r#"<a href="pdf/a.pdf">Ontologies</a>"#
        );
        assert_eq!(format_named("[%(missing)s]", &v), "[]");
    }

    #[test]
    fn malformed_sequences_are_kept() {
        let v = values(&[("a", "1")]);
        assert_eq!(format_named("50% of %(a)d and %(a", &v), "50% of %(a)d and %(a");
        assert_eq!(format_named("%s stays", &v), "%s stays");
    }
}
