// crates/rdfa-harness-core/src/manifest/mod.rs
// ============================================================================
// Module: RDFa Harness Manifest Loader
// Description: Turns an RDF test manifest into ordered test records.
// Purpose: Fetch, parse, filter, and number manifest entries.
// Dependencies: regex, thiserror, oxrdfio
// ============================================================================

//! ## Overview
//! [`ManifestLoader`] performs one fetch of the manifest, runs the
//! test-entry selection from [`graph`], keeps rows whose review status
//! matches the requested classification, and returns [`TestRecord`]s sorted
//! by test number.
//!
//! Security posture: manifests are untrusted remote input. A row whose
//! source URI carries no test number fails the whole load instead of being
//! skipped.

pub mod graph;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub use self::graph::ManifestGraph;
pub use self::graph::ManifestRow;
pub use self::graph::detect_format;
use crate::core::Classification;
use crate::core::ExpectedResult;
use crate::core::TestNumber;
use crate::core::TestRecord;
use crate::interfaces::FetchError;
use crate::interfaces::Fetcher;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be retrieved.
    #[error("manifest fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// The manifest is not valid RDF.
    #[error("manifest parse failed: {0}")]
    Parse(String),
    /// A matching row has no test number in its source URI.
    #[error("no test number in source uri: {uri}")]
    InvalidTestNumber {
        /// Offending source URI.
        uri: String,
    },
    /// A matching row carries an unrecognized expected-result flag.
    #[error("invalid expected result {value:?} for {uri}")]
    InvalidExpectedResult {
        /// Source URI of the row.
        uri: String,
        /// Raw flag value.
        value: String,
    },
}

// ============================================================================
// SECTION: Test Number Extraction
// ============================================================================

/// Markup document name pattern (`0042.xhtml`, `0042.html`).
#[allow(clippy::expect_used, reason = "Constant pattern; compilation is covered by unit tests.")]
static MARKUP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\..?html$").expect("markup number pattern"));

/// SVG document name pattern (`0042.svg`), tried after the markup pattern.
#[allow(clippy::expect_used, reason = "Constant pattern; compilation is covered by unit tests.")]
static SVG_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.svg$").expect("svg number pattern"));

/// Extracts the test number from a source URI.
///
/// # Errors
///
/// Returns [`ManifestError::InvalidTestNumber`] when neither pattern matches
/// or the digits overflow.
pub fn extract_test_number(source_uri: &str) -> Result<TestNumber, ManifestError> {
    MARKUP_NUMBER
        .captures(source_uri)
        .or_else(|| SVG_NUMBER.captures(source_uri))
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .map(TestNumber::new)
        .ok_or_else(|| ManifestError::InvalidTestNumber {
            uri: source_uri.to_string(),
        })
}

// ============================================================================
// SECTION: Record Construction
// ============================================================================

/// Builds ordered records from selection rows.
///
/// Rows whose classification does not match `classification` are dropped
/// before number extraction.
///
/// # Errors
///
/// Returns [`ManifestError`] when a kept row has no test number or an
/// invalid expected flag.
pub fn records_from_rows(
    rows: Vec<ManifestRow>,
    classification: &str,
) -> Result<Vec<TestRecord>, ManifestError> {
    let mut records = Vec::new();
    for row in rows {
        let status = Classification::from_status(&row.status);
        if !status.matches(classification) {
            continue;
        }
        let number = extract_test_number(&row.input)?;
        let expected = match row.expected.as_deref() {
            None => ExpectedResult::default(),
            Some(raw) => ExpectedResult::parse(raw).ok_or_else(|| {
                ManifestError::InvalidExpectedResult {
                    uri: row.input.clone(),
                    value: raw.to_string(),
                }
            })?,
        };
        records.push(TestRecord {
            number,
            title: row.title,
            source_uri: row.input,
            query_uri: row.results,
            classification: status,
            expected,
        });
    }
    records.sort_by_key(|record| record.number);
    Ok(records)
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Loads test records from a remote manifest.
#[derive(Debug, Clone)]
pub struct ManifestLoader<F> {
    /// Fetcher used for the manifest request.
    fetcher: F,
}

impl<F: Fetcher> ManifestLoader<F> {
    /// Creates a loader backed by `fetcher`.
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self {
            fetcher,
        }
    }

    /// Fetches the manifest at `manifest_uri` and returns the records whose
    /// review status equals `classification`, sorted by test number.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] on fetch, parse, or record failures. Nothing
    /// is retried.
    pub fn load_test_cases(
        &self,
        manifest_uri: &str,
        classification: &str,
    ) -> Result<Vec<TestRecord>, ManifestError> {
        let resource = self.fetcher.fetch(manifest_uri)?;
        let format = detect_format(resource.content_type.as_deref(), manifest_uri);
        let graph = ManifestGraph::parse(&resource.bytes, format, Some(manifest_uri))?;
        records_from_rows(graph.select_test_entries(), classification)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::ManifestError;
    use super::ManifestRow;
    use super::extract_test_number;
    use super::records_from_rows;
    use crate::core::ExpectedResult;

    fn row(input: &str, status: &str, expected: Option<&str>) -> ManifestRow {
        ManifestRow {
            title: format!("title {input}"),
            input: input.to_string(),
            results: input.replace(".xhtml", ".sparql"),
            status: format!("http://www.w3.org/2006/03/test-description#{status}"),
            expected: expected.map(str::to_string),
        }
    }

    #[test]
    fn extracts_markup_and_svg_numbers() {
        assert_eq!(extract_test_number("http://ex.org/t/0042.xhtml").unwrap().get(), 42);
        assert_eq!(extract_test_number("http://ex.org/t/0042.html").unwrap().get(), 42);
        assert_eq!(extract_test_number("http://ex.org/t/0007.svg").unwrap().get(), 7);
    }

    #[test]
    fn missing_number_is_an_error() {
        let err = extract_test_number("http://ex.org/t/readme.txt").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidTestNumber { .. }));
    }

    #[test]
    fn filters_before_extracting_numbers() {
        let rows = vec![
            row("http://ex.org/0002.xhtml", "approved", None),
            row("http://ex.org/no-number", "unreviewed", None),
            row("http://ex.org/0001.xhtml", "approved", Some("false")),
        ];
        let records = records_from_rows(rows, "approved").unwrap();
        let numbers: Vec<u32> = records.iter().map(|record| record.number.get()).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(records[0].expected, ExpectedResult::False);
        assert_eq!(records[1].expected, ExpectedResult::True);
    }

    #[test]
    fn invalid_expected_flag_fails_the_load() {
        let rows = vec![row("http://ex.org/0001.xhtml", "approved", Some("maybe"))];
        let err = records_from_rows(rows, "approved").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidExpectedResult { .. }));
    }
}
