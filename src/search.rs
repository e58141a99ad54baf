//! # Matching
//!
//! Case-insensitive substring scan over the catalog. Deliberately not a
//! search engine: no tokenization, fuzzy matching, or relevance ranking.
//!
//! Results are sorted by the formatted tariff code in descending
//! lexicographic order (plain string comparison, so `"9999"` outranks
//! `"10000"`), then capped at [`MAX_RESULTS`]. The sort is stable, so rows
//! with equal codes keep their catalog order.
//!
//! [`predict`] does not special-case the empty query: an empty string is a
//! substring of every description, so it matches the whole catalog. Rejecting
//! empty input is the HTTP handler's job, not this module's.

use serde::Serialize;

use crate::catalog::{Catalog, CatalogEntry};

pub const MAX_RESULTS: usize = 5;

const MISSING: &str = "N/A";

/// Projection of a [`CatalogEntry`] handed to the presentation layer. Owned
/// by the caller; built fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub chapter: String,
    pub heading: String,
    pub subheading: String,
    pub tariff_code: String,
    pub description: String,
}

impl From<&CatalogEntry> for MatchResult {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            chapter: or_missing(&entry.chapter),
            heading: or_missing(&entry.heading),
            subheading: or_missing(&entry.subheading),
            tariff_code: or_missing(&entry.tariff_code),
            description: or_missing(&entry.description),
        }
    }
}

fn or_missing(field: &str) -> String {
    if field.is_empty() {
        MISSING.to_string()
    } else {
        field.to_string()
    }
}

/// Scans the catalog for entries whose description contains the normalized
/// query, and returns at most [`MAX_RESULTS`] projections sorted by tariff
/// code descending. Pure and infallible: malformed input can only produce an
/// empty result, never an error.
pub fn predict(catalog: &Catalog, text: &str) -> Vec<MatchResult> {
    let query = text.trim().to_lowercase();

    let mut results: Vec<MatchResult> = catalog
        .entries()
        .iter()
        .filter(|entry| entry.description.to_lowercase().contains(&query))
        .map(MatchResult::from)
        .collect();

    results.sort_by(|a, b| b.tariff_code.cmp(&a.tariff_code));
    results.truncate(MAX_RESULTS);

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(rows: &[(&str, &str)]) -> Catalog {
        Catalog::from_entries(
            rows.iter()
                .map(|(code, description)| CatalogEntry::new(code, description))
                .collect(),
        )
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = catalog(&[("8517120050", "Steel Widget Assembly")]);

        assert_eq!(predict(&catalog, "Widget").len(), 1);
        assert_eq!(predict(&catalog, "widget").len(), 1);
        assert_eq!(predict(&catalog, "WIDGET").len(), 1);
    }

    #[test]
    fn matching_is_substring_not_whole_word() {
        let catalog = catalog(&[("8517120050", "Widget")]);

        assert_eq!(predict(&catalog, "idge").len(), 1);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let catalog = catalog(&[("8517120050", "Widget")]);

        assert_eq!(predict(&catalog, "  widget  ").len(), 1);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let catalog = catalog(&[("8517120050", "Widget")]);

        assert!(predict(&catalog, "carburetor").is_empty());
    }

    #[test]
    fn results_are_capped() {
        let entries = (0..7)
            .map(|i| CatalogEntry::new(&format!("010100{i}"), "Live horses"))
            .collect();
        let catalog = Catalog::from_entries(entries);

        assert_eq!(predict(&catalog, "horses").len(), MAX_RESULTS);
    }

    #[test]
    fn results_sort_by_tariff_code_descending() {
        let catalog = catalog(&[
            ("0101000000", "Live horses"),
            ("1001000000", "Live horses"),
            ("0201000000", "Live horses"),
        ]);

        let results = predict(&catalog, "horses");
        let codes: Vec<&str> = results.iter().map(|r| r.tariff_code.as_str()).collect();

        assert_eq!(codes, vec!["1001.00.0000", "0201.00.0000", "0101.00.0000"]);
    }

    #[test]
    fn sort_is_lexicographic_not_numeric() {
        let catalog = catalog(&[("10000", "Widget"), ("9999", "Widget")]);

        let results = predict(&catalog, "widget");
        let codes: Vec<&str> = results.iter().map(|r| r.tariff_code.as_str()).collect();

        assert_eq!(codes, vec!["9999", "10000"]);
    }

    #[test]
    fn truncation_keeps_the_highest_codes() {
        let catalog = catalog(&[
            ("0101000000", "Horses"),
            ("0201000000", "Horses"),
            ("0301000000", "Horses"),
            ("0401000000", "Horses"),
            ("0501000000", "Horses"),
            ("0601000000", "Horses"),
        ]);

        let results = predict(&catalog, "horses");
        let codes: Vec<&str> = results.iter().map(|r| r.tariff_code.as_str()).collect();

        assert_eq!(
            codes,
            vec![
                "0601.00.0000",
                "0501.00.0000",
                "0401.00.0000",
                "0301.00.0000",
                "0201.00.0000"
            ]
        );
    }

    #[test]
    fn equal_codes_keep_catalog_order() {
        let catalog = catalog(&[
            ("0101000000", "Alpha widget"),
            ("0101000000", "Beta widget"),
        ]);

        let results = predict(&catalog, "widget");
        let descriptions: Vec<&str> = results.iter().map(|r| r.description.as_str()).collect();

        assert_eq!(descriptions, vec!["Alpha widget", "Beta widget"]);
    }

    #[test]
    fn empty_fields_project_to_sentinel() {
        let catalog = catalog(&[("", "Widget")]);

        let results = predict(&catalog, "widget");

        assert_eq!(results[0].chapter, "N/A");
        assert_eq!(results[0].heading, "N/A");
        assert_eq!(results[0].subheading, "N/A");
        assert_eq!(results[0].tariff_code, "N/A");
    }

    #[test]
    fn missing_description_is_searchable_as_sentinel() {
        let catalog = catalog(&[("0101210010", "")]);

        let results = predict(&catalog, "n/a");

        assert_eq!(results[0].description, "N/A");
    }

    #[test]
    fn empty_query_matches_every_entry() {
        let catalog = catalog(&[("0101", "Horses"), ("0201", "Beef")]);

        assert_eq!(predict(&catalog, "   ").len(), 2);
    }
}
