// crates/rdfa-harness-core/src/runtime/oracle.rs
// ============================================================================
// Module: RDFa Harness Verification Oracle
// Description: Extractor and query-engine round trip for a single test case.
// Purpose: Decide pass or fail for one test by substring oracle.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The oracle never evaluates anything itself. It builds an extraction URL,
//! splices it into the test's boolean query as the default graph, and asks
//! the query engine for an HTML-styled answer. The raw response is searched
//! for `<boolean>true</boolean>` or `<boolean>false</boolean>`.
//!
//! An engine error page contains neither marker, so it fails the test the
//! same way a false assertion does. [`VerificationOutcome::observed`] keeps
//! the two apart for callers that care.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ExpectedResult;
use crate::core::TestNumber;
use crate::core::TestRecord;
use crate::core::VerificationOutcome;
use crate::encoding::quote;
use crate::interfaces::FetchError;
use crate::interfaces::Fetcher;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Clause rewritten to bind the extracted graph.
const ASK_CLAUSE: &str = "ASK WHERE";

/// Fixed suffix appended to every query-engine request.
pub const ENGINE_QUERY_SUFFIX: &str = "&default-graph-uri=&stylesheet=%2Fxml-to-html.xsl";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Verification errors.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The query document could not be retrieved.
    #[error("query document fetch failed: {0}")]
    QueryDocumentFetch(FetchError),
    /// The query document has no `ASK WHERE` clause to rewrite.
    #[error("query document {uri} has no ASK WHERE clause")]
    MalformedQueryRewrite {
        /// Query document URI.
        uri: String,
    },
    /// The query engine could not be reached.
    #[error("query engine fetch failed: {0}")]
    QueryEngineFetch(FetchError),
}

// ============================================================================
// SECTION: URL Construction
// ============================================================================

/// Builds the extractor URL for a source document.
#[must_use]
pub fn extraction_url(extractor_endpoint: &str, source_uri: &str) -> String {
    format!("{extractor_endpoint}{}", quote(source_uri))
}

/// Binds `extraction_url` as the default graph of the first `ASK WHERE`.
///
/// Returns `None` when the query has no `ASK WHERE` clause.
#[must_use]
pub fn rewrite_query(query: &str, extraction_url: &str) -> Option<String> {
    query
        .contains(ASK_CLAUSE)
        .then(|| query.replacen(ASK_CLAUSE, &format!("ASK FROM <{extraction_url}> WHERE"), 1))
}

/// Builds the query-engine URL for a rewritten query.
#[must_use]
pub fn evaluation_url(query_endpoint: &str, rewritten_query: &str) -> String {
    format!("{query_endpoint}{}{ENGINE_QUERY_SUFFIX}", quote(rewritten_query))
}

/// Reads the boolean marker out of an engine response.
///
/// The expected marker is checked first so a response carrying both still
/// passes, matching the substring test.
#[must_use]
pub fn judge(response: &str, expected: ExpectedResult) -> (bool, Option<bool>) {
    let marker = |value: &str| format!("<boolean>{value}</boolean>");
    let passed = response.contains(&marker(expected.as_str()));
    let observed = if passed {
        Some(expected.as_bool())
    } else if response.contains(&marker("true")) {
        Some(true)
    } else if response.contains(&marker("false")) {
        Some(false)
    } else {
        None
    };
    (passed, observed)
}

// ============================================================================
// SECTION: Oracle
// ============================================================================

/// Inputs for one verification.
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest<'a> {
    /// Test number, if known.
    pub number: Option<TestNumber>,
    /// Extractor endpoint prefix.
    pub extractor_endpoint: &'a str,
    /// Query engine endpoint prefix.
    pub query_endpoint: &'a str,
    /// Markup document URI.
    pub source_uri: &'a str,
    /// Query document URI.
    pub query_uri: &'a str,
    /// Expected answer.
    pub expected: ExpectedResult,
}

impl<'a> VerificationRequest<'a> {
    /// Builds the request for a manifest record.
    #[must_use]
    pub fn for_record(
        record: &'a TestRecord,
        extractor_endpoint: &'a str,
        query_endpoint: &'a str,
    ) -> Self {
        Self {
            number: Some(record.number),
            extractor_endpoint,
            query_endpoint,
            source_uri: record.source_uri.as_str(),
            query_uri: record.query_uri.as_str(),
            expected: record.expected,
        }
    }
}

/// Runs verification round trips through a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct VerificationOracle<F> {
    /// Fetcher used for the query document and engine requests.
    fetcher: F,
}

impl<F: Fetcher> VerificationOracle<F> {
    /// Creates an oracle backed by `fetcher`.
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self {
            fetcher,
        }
    }

    /// Verifies one test case.
    ///
    /// Performs two fetches in order: the query document, then the query
    /// engine. The extraction URL is dereferenced by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] on transport failures or a query without an
    /// `ASK WHERE` clause. A reachable engine that answers with an error
    /// page is a failed outcome, not an error.
    pub fn verify(&self, request: &VerificationRequest<'_>) -> Result<VerificationOutcome, OracleError> {
        let extraction = extraction_url(request.extractor_endpoint, request.source_uri);
        let query =
            self.fetcher.fetch_text(request.query_uri).map_err(OracleError::QueryDocumentFetch)?;
        let rewritten = rewrite_query(&query, &extraction).ok_or_else(|| {
            OracleError::MalformedQueryRewrite {
                uri: request.query_uri.to_string(),
            }
        })?;
        let evaluation = evaluation_url(request.query_endpoint, &rewritten);
        let response =
            self.fetcher.fetch_text(&evaluation).map_err(OracleError::QueryEngineFetch)?;
        let (passed, observed) = judge(&response, request.expected);
        Ok(VerificationOutcome {
            number: request.number,
            expected: request.expected,
            observed,
            passed,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
