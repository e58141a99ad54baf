//! # Tariff catalog
//!
//! In-memory reference table of HS codes, loaded once from a CSV export at
//! startup and read-only for the rest of the process lifetime.
//!
//! ## Columns
//!
//! The source file is header-delimited; only two columns matter and both are
//! matched case-sensitively against the exact header text:
//! - `hs code`: the raw, unformatted code string
//! - `DESCRIPTION`: free-text goods description
//!
//! Other columns are ignored. A missing code column leaves every raw code
//! empty; a missing or empty description becomes `"N/A"`.
//!
//! ## Derived fields
//!
//! Each row yields four display-formatted code fields, all derived by
//! character-prefix extraction with no numeric interpretation:
//! - `chapter` / `heading`: the 2- and 4-character prefixes, kept as-is
//! - `subheading`: the 6-character prefix, dotted `XXXX.XX`
//! - `tariff_code`: the full code, dotted `XXXX.XX.XXXX` when it is exactly
//!   10 characters
//!
//! Codes shorter than a prefix width pass through unchanged. Rows are never
//! dropped for short or malformed codes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const CODE_COLUMN: &str = "hs code";
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";

const MISSING: &str = "N/A";

/// Errors that abort a catalog load. Fatal at startup: the server must not
/// accept matching traffic without a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Catalog file missing or unreadable.
    #[error("failed to open catalog file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Catalog file is not well-formed delimited text.
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One formatted tariff-code record, built once per source row at load time
/// and never recomputed.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub chapter: String,
    pub heading: String,
    pub subheading: String,
    pub tariff_code: String,
    pub description: String,
}

impl CatalogEntry {
    pub fn new(code: &str, description: &str) -> Self {
        Self {
            chapter: format_heading(prefix(code, 2)),
            heading: format_heading(prefix(code, 4)),
            subheading: format_subheading(prefix(code, 6)),
            tariff_code: format_tariff(code),
            description: if description.is_empty() {
                MISSING.to_string()
            } else {
                description.to_string()
            },
        }
    }
}

/// Ordered, immutable sequence of [`CatalogEntry`] values in source-file row
/// order. Row order is the stable tie-break when results sort on equal keys.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Reads the whole file before returning; any read error aborts the load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|source| LoadError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        let code_index = headers.iter().position(|header| header == CODE_COLUMN);
        let description_index = headers
            .iter()
            .position(|header| header == DESCRIPTION_COLUMN);

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            let code = code_index.and_then(|index| record.get(index)).unwrap_or("");
            let description = description_index
                .and_then(|index| record.get(index))
                .unwrap_or("");

            entries.push(CatalogEntry::new(code, description));
        }

        info!(
            "Loaded {} catalog entries from {}",
            entries.len(),
            path.display()
        );

        Ok(Self { entries })
    }

    /// Builds a catalog directly from entries, bypassing the file load.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First `n` characters of `s`, or all of `s` when shorter.
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Byte offset of the `n`th character, clamped to the end of the string.
fn nth_boundary(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(index, _)| index)
}

/// Chapter and heading keep their characters as-is: the string is split
/// before its final two characters and rejoined without a separator.
fn format_heading(s: &str) -> String {
    let len = s.chars().count();
    if len >= 2 {
        let cut = nth_boundary(s, len - 2);
        let (front, back) = s.split_at(cut);
        format!("{front}{back}")
    } else {
        s.to_string()
    }
}

fn format_subheading(s: &str) -> String {
    if s.chars().count() == 6 {
        let cut = nth_boundary(s, 4);
        format!("{}.{}", &s[..cut], &s[cut..])
    } else {
        s.to_string()
    }
}

fn format_tariff(s: &str) -> String {
    if s.chars().count() == 10 {
        let first = nth_boundary(s, 4);
        let second = nth_boundary(s, 6);
        format!("{}.{}.{}", &s[..first], &s[first..second], &s[second..])
    } else {
        s.to_string()
    }
}
