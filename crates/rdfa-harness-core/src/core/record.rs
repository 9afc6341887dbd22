// crates/rdfa-harness-core/src/core/record.rs
// ============================================================================
// Module: RDFa Harness Records
// Description: Test records, expected results, and verification outcomes.
// Purpose: Request-scoped value types shared by the loader, oracle, and views.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! All records are immutable values built once per request. Nothing here is
//! cached or persisted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::Classification;
use crate::core::identifiers::TestNumber;

// ============================================================================
// SECTION: Expected Result
// ============================================================================

/// Boolean answer a test query is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedResult {
    /// The query should answer `true`. Used when the manifest is silent.
    #[default]
    True,
    /// The query should answer `false`.
    False,
}

impl ExpectedResult {
    /// Parses the manifest or request form of the flag.
    ///
    /// Accepts `true`/`false` in any case and `1`/`0`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
            Some(Self::True)
        } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
            Some(Self::False)
        } else {
            None
        }
    }

    /// Returns the literal used in boolean result markers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// Returns the boolean value.
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for ExpectedResult {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl fmt::Display for ExpectedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Test Record
// ============================================================================

/// One manifest entry describing a test case.
///
/// # Invariants
/// - `number` was extracted from `source_uri`.
/// - Sequences of records are sorted ascending by `number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Test case number.
    pub number: TestNumber,
    /// Free-text title.
    pub title: String,
    /// URI of the markup document under test.
    pub source_uri: String,
    /// URI of the boolean query document.
    pub query_uri: String,
    /// Review classification.
    pub classification: Classification,
    /// Expected query answer.
    pub expected: ExpectedResult,
}

// ============================================================================
// SECTION: Verification Outcome
// ============================================================================

/// Result of one oracle round trip.
///
/// # Invariants
/// - `passed` is true only when the expected marker appeared in the engine response.
/// - `observed` is `None` when no boolean marker appeared at all, which covers
///   engine error pages and transport-level garbage alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Test case number, when known to the caller.
    pub number: Option<TestNumber>,
    /// Expected answer the oracle searched for.
    pub expected: ExpectedResult,
    /// Boolean marker found in the response, if any.
    pub observed: Option<bool>,
    /// Whether the test passed.
    pub passed: bool,
}

impl VerificationOutcome {
    /// Returns the status label shown to users.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }
}

// ============================================================================
// SECTION: Test Details
// ============================================================================

/// Diagnostic material for one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDetails {
    /// Test case identifier as supplied by the caller.
    pub id: String,
    /// Markup document URI.
    pub source_uri: String,
    /// Query document URI.
    pub query_uri: String,
    /// Extractor URL producing RDF/XML.
    pub extraction_url: String,
    /// Extractor URL producing N3.
    pub n3_extraction_url: String,
    /// Raw markup document.
    pub source_text: String,
    /// Extracted graph in N3.
    pub n3_text: String,
    /// Extracted graph in RDF/XML.
    pub rdf_text: String,
    /// Raw query document.
    pub query_text: String,
}
