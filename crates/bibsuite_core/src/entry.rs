/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The parsed bibliographic entry and its derived citation forms.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::names::{to_first_last, NameList};

/// Publication types known to the renderer.
///
/// Template fragments are looked up per variant, so anything else a
/// BibTeX file declares is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryType {
    Article,
    Book,
    InProceedings,
    InCollection,
    Conference,
    Collection,
    Unpublished,
    PhdThesis,
    MastersThesis,
    TechReport,
    Misc,
    Other(String),
}

impl EntryType {
    pub fn as_str(&self) -> &str {
        match self {
            EntryType::Article => "article",
            EntryType::Book => "book",
            EntryType::InProceedings => "inproceedings",
            EntryType::InCollection => "incollection",
            EntryType::Conference => "conference",
            EntryType::Collection => "collection",
            EntryType::Unpublished => "unpublished",
            EntryType::PhdThesis => "phdthesis",
            EntryType::MastersThesis => "mastersthesis",
            EntryType::TechReport => "techreport",
            EntryType::Misc => "misc",
            EntryType::Other(s) => s,
        }
    }

    /// OpenURL genre used by COinS.
    pub fn coins_genre(&self) -> &'static str {
        match self {
            EntryType::InProceedings | EntryType::Conference => "proceeding",
            EntryType::Article => "article",
            EntryType::Book | EntryType::Collection => "book",
            EntryType::InCollection => "incollection",
            _ => "unknown",
        }
    }
}

impl From<&str> for EntryType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => EntryType::Article,
            "book" => EntryType::Book,
            "inproceedings" => EntryType::InProceedings,
            "incollection" => EntryType::InCollection,
            "conference" => EntryType::Conference,
            "collection" => EntryType::Collection,
            "unpublished" => EntryType::Unpublished,
            "phdthesis" => EntryType::PhdThesis,
            "mastersthesis" => EntryType::MastersThesis,
            "techreport" => EntryType::TechReport,
            "misc" => EntryType::Misc,
            other => EntryType::Other(other.to_string()),
        }
    }
}

impl From<String> for EntryType {
    fn from(s: String) -> Self {
        EntryType::from(s.as_str())
    }
}

impl From<EntryType> for String {
    fn from(t: EntryType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip the brace and quote characters BibTeX uses for escaping.
pub fn cleanup(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '{' | '}' | '"')).collect()
}

/// One bibliographic record as read from a BibTeX file.
///
/// Immutable once built; rendering-time data lives in the publish
/// crate's `RenderableEntry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    key: String,
    entry_type: EntryType,
    raw_fields: IndexMap<String, String>,
    clean_fields: IndexMap<String, String>,
    source_path: PathBuf,
}

impl ParsedEntry {
    pub fn new(
        key: impl Into<String>,
        entry_type: EntryType,
        raw_fields: IndexMap<String, String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        let clean_fields = raw_fields
            .iter()
            .map(|(name, value)| {
                let clean = cleanup(value);
                let clean = if name == "author" {
                    NameList::parse(&clean).to_field()
                } else {
                    clean
                };
                (name.clone(), clean)
            })
            .collect();

        Self {
            key: key.into(),
            entry_type,
            raw_fields,
            clean_fields,
            source_path: source_path.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entry_type(&self) -> &EntryType {
        &self.entry_type
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn raw_fields(&self) -> &IndexMap<String, String> {
        &self.raw_fields
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.clean_fields
    }

    /// A cleaned field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.clean_fields.get(name).map(String::as_str)
    }

    fn field_or_empty(&self, name: &str) -> &str {
        self.field(name).unwrap_or_default()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.clean_fields.contains_key(name)
    }

    pub fn title(&self) -> &str {
        self.field_or_empty("title")
    }

    pub fn year(&self) -> &str {
        self.field_or_empty("year")
    }

    /// The year as a number, reading leading digits only ("2009a" → 2009).
    pub fn year_value(&self) -> Option<i32> {
        let digits: String = self
            .year()
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    pub fn names(&self) -> NameList {
        NameList::parse(self.field_or_empty("author"))
    }

    /// The author roster joined as "A, B and C".
    pub fn author(&self) -> String {
        self.names().join(None)
    }

    pub fn author_with(&self, formatter: &dyn Fn(&str) -> String) -> String {
        self.names().join(Some(formatter))
    }

    /// Journal or proceedings, ISBN, publisher, pages and volume(number).
    pub fn outlet(&self) -> String {
        let container = self
            .field("journal")
            .filter(|s| !s.is_empty())
            .or_else(|| self.field("booktitle"))
            .unwrap_or_default()
            .to_string();

        let mut outlet = vec![container];
        if let Some(isbn) = self.field("isbn") {
            outlet.push(format!("ISBN: {}", isbn));
        }
        outlet.push(self.field_or_empty("publisher").to_string());
        if let Some(pages) = self.field("pages") {
            outlet.push(format!("pages {}", pages));
        }
        if let (Some(volume), Some(number)) = (self.field("volume"), self.field("number")) {
            outlet.push(format!("{}({})", volume, number));
        }

        outlet.retain(|s| !s.is_empty());
        outlet.join(", ")
    }

    /// File name stem of the form `Surname-LongestTitleWordYear`.
    pub fn ieee_filename(&self) -> String {
        let longest = self
            .title()
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .fold("", |best, word| {
                if word.chars().count() > best.chars().count() {
                    word
                } else {
                    best
                }
            });
        format!(
            "{}-{}{}",
            self.names().first_author_surname(),
            longest,
            self.year()
        )
    }

    pub fn citation(&self) -> String {
        let source = self
            .source_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        format!(
            "[{}, {}] {} ({}). '{}', {}",
            self.key,
            source,
            self.author(),
            self.year(),
            self.title(),
            self.outlet()
        )
    }

    pub fn wikipedia_citation(&self) -> String {
        format!(r#"<cite id="{}">{}</cite>"#, self.key, self.citation())
    }

    /// The record as BibTeX source, built from the raw field values.
    pub fn bibtex_citation(&self) -> String {
        let fields: Vec<String> = self
            .raw_fields
            .iter()
            .map(|(name, value)| format!("  {} = {{{}}}", name, value))
            .collect();
        format!(
            "@{}{{{},\n{}\n}}",
            self.entry_type.as_str().to_uppercase(),
            self.key,
            fields.join(",\n")
        )
    }

    /// A COinS span carrying the entry as an OpenURL ContextObject.
    pub fn coins_citation(&self) -> String {
        let genre = self.entry_type.coins_genre();
        let format = if genre == "book" { "book" } else { "journal" };

        let mut params: Vec<(String, String)> = vec![
            ("ctx_ver".into(), "Z39.88-2004".into()),
            ("rft_val_fmt".into(), format!("info:ofi/fmt:kev:mtx:{}", format)),
            ("rfr_id".into(), "info:sid/bibsuite".into()),
            ("rft.genre".into(), genre.into()),
        ];

        let title_key = if genre == "book" { "rft.btitle" } else { "rft.atitle" };
        params.push((title_key.into(), self.title().into()));
        if let Some(journal) = self.field("journal") {
            params.push(("rft.jtitle".into(), journal.into()));
        } else if let Some(booktitle) = self.field("booktitle").filter(|_| genre != "book") {
            params.push(("rft.btitle".into(), booktitle.into()));
        }

        for (field, param) in [
            ("year", "rft.date"),
            ("volume", "rft.volume"),
            ("number", "rft.issue"),
            ("pages", "rft.pages"),
            ("isbn", "rft.isbn"),
            ("publisher", "rft.pub"),
        ] {
            if let Some(value) = self.field(field) {
                params.push((param.into(), value.into()));
            }
        }

        let names = self.names();
        if !names.is_empty() {
            params.push(("rft.aulast".into(), names.first_author_surname()));
            let given = names.first_author_given();
            if !given.is_empty() {
                params.push(("rft.aufirst".into(), given));
            }
            for name in names.names() {
                params.push(("rft.au".into(), to_first_last(name)));
            }
        }

        let title = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&amp;");
        format!(r#"<span class="Z3988" title="{}"></span>"#, title)
    }

    /// True if every term occurs, case-insensitively, somewhere in the
    /// entry's key or cleaned field values.
    pub fn contains<S: AsRef<str>>(&self, terms: &[S]) -> bool {
        let mut haystack = self
            .clean_fields
            .values()
            .map(|v| v.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        haystack.push(' ');
        haystack.push_str(&self.key.to_lowercase());

        terms
            .iter()
            .all(|t| haystack.contains(&t.as_ref().to_lowercase()))
    }

    /// Order by year alone. Entries from the same year compare equal.
    pub fn cmp_by_year(&self, other: &Self) -> Ordering {
        self.year_value().cmp(&other.year_value())
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fields: &[(&str, &str)]) -> ParsedEntry {
        let raw = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ParsedEntry::new("weichselbraun2009", EntryType::Article, raw, "/data/self.bib")
    }

    #[test]
    fn cleanup_strips_escapes() {
        assert_eq!(cleanup(r#"{NASA} "quoted" title"#), "NASA quoted title");
    }

    #[test]
    fn author_is_normalized_on_construction() {
        let e = entry(&[("author", "Albert Weichselbraun and {Smith}, John")]);
        assert_eq!(e.field("author"), Some("Weichselbraun, Albert and Smith, John"));
        assert_eq!(e.author(), "Weichselbraun, Albert and Smith, John");
        assert_eq!(
            e.author_with(&to_first_last),
            "Albert Weichselbraun and John Smith"
        );
    }

    #[test]
    fn outlet_concatenates_present_segments() {
        let e = entry(&[
            ("journal", "Journal of Things"),
            ("publisher", "Springer"),
            ("pages", "1--10"),
            ("volume", "4"),
            ("number", "2"),
        ]);
        assert_eq!(e.outlet(), "Journal of Things, Springer, pages 1--10, 4(2)");

        let e = entry(&[("booktitle", "Proceedings"), ("isbn", "123"), ("volume", "4")]);
        assert_eq!(e.outlet(), "Proceedings, ISBN: 123");

        assert_eq!(entry(&[]).outlet(), "");
    }

    #[test]
    fn ieee_filename_takes_first_longest_word() {
        let e = entry(&[
            ("author", "Albert Weichselbraun"),
            ("title", "Optimizing Ontology Learning: Parameters"),
            ("year", "2009"),
        ]);
        assert_eq!(e.ieee_filename(), "Weichselbraun-Optimizing2009");

        let e = entry(&[("author", "Plato"), ("title", "Laws Meno"), ("year", "1999")]);
        assert_eq!(e.ieee_filename(), "Plato-Laws1999");
    }

    #[test]
    fn citation_formats() {
        let e = entry(&[
            ("author", "Albert Weichselbraun"),
            ("title", "A {Study}"),
            ("year", "2009"),
            ("journal", "J"),
        ]);
        assert_eq!(
            e.citation(),
            "[weichselbraun2009, self.bib] Weichselbraun, Albert (2009). 'A Study', J"
        );
        assert!(e.wikipedia_citation().starts_with(r#"<cite id="weichselbraun2009">[weich"#));
        assert!(e.wikipedia_citation().ends_with("</cite>"));
    }

    #[test]
    fn bibtex_citation_uses_raw_fields() {
        let e = entry(&[("title", "A {Study}"), ("year", "2009")]);
        assert_eq!(
            e.bibtex_citation(),
            "@ARTICLE{weichselbraun2009,\n  title = {A {Study}},\n  year = {2009}\n}"
        );
    }

    #[test]
    fn coins_lists_every_author() {
        let e = entry(&[
            ("author", "Albert Weichselbraun and John Smith"),
            ("title", "Ontology Learning"),
            ("journal", "J"),
        ]);
        let coins = e.coins_citation();
        assert!(coins.starts_with(r#"<span class="Z3988" title="ctx_ver=Z39.88-2004&amp;"#));
        assert!(coins.contains("rft.genre=article"));
        assert!(coins.contains("rft.atitle=Ontology+Learning"));
        assert!(coins.contains("rft.aulast=Weichselbraun&amp;rft.aufirst=Albert"));
        assert_eq!(coins.matches("rft.au=").count(), 2);
        assert!(coins.contains("rft.au=John+Smith"));
    }

    #[test]
    fn coins_book_has_one_btitle() {
        let raw = [("title", "Visual Analytics"), ("booktitle", "Series")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let e = ParsedEntry::new("scharl2020", EntryType::Book, raw, "self.bib");
        let coins = e.coins_citation();
        assert_eq!(coins.matches("rft.btitle=").count(), 1);
        assert!(coins.contains("rft.btitle=Visual+Analytics"));
    }

    #[test]
    fn coins_genre_lookup() {
        assert_eq!(EntryType::Conference.coins_genre(), "proceeding");
        assert_eq!(EntryType::Collection.coins_genre(), "book");
        assert_eq!(EntryType::InCollection.coins_genre(), "incollection");
        assert_eq!(EntryType::PhdThesis.coins_genre(), "unknown");
    }

    #[test]
    fn contains_requires_every_term() {
        let e = entry(&[("author", "Albert Weichselbraun"), ("title", "Ontologies")]);
        assert!(e.contains(&["albert"]));
        assert!(e.contains(&["ALBERT", "ontolog"]));
        assert!(e.contains(&["weichselbraun2009"]));
        assert!(!e.contains(&["albert", "anna"]));
        assert!(e.contains::<&str>(&[]));
    }

    #[test]
    fn year_ordering_is_weak() {
        let a = entry(&[("year", "2009")]);
        let b = entry(&[("year", "2020"), ("title", "other")]);
        let c = entry(&[("year", "2009"), ("title", "same year")]);
        assert_eq!(a.cmp_by_year(&b), Ordering::Less);
        assert_eq!(a.cmp_by_year(&c), Ordering::Equal);
        assert_eq!(entry(&[]).cmp_by_year(&a), Ordering::Less);
    }

    #[test]
    fn entry_type_round_trips_through_strings() {
        assert_eq!(EntryType::from("InProceedings"), EntryType::InProceedings);
        assert_eq!(EntryType::from("patent"), EntryType::Other("patent".into()));
        assert_eq!(EntryType::MastersThesis.to_string(), "mastersthesis");
    }
}
