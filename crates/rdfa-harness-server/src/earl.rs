// crates/rdfa-harness-server/src/earl.rs
// ============================================================================
// Module: RDFa Harness EARL Report
// Description: RDF/XML conformance report in the EARL vocabulary.
// Purpose: Publish per-test outcomes for an extractor under test.
// Dependencies: rdfa-harness-core
// ============================================================================

//! ## Overview
//! One `earl:TestCase` and one `earl:Assertion` per record. A test whose
//! query could not be posed is `earl:notTested`; transport failures count
//! as `earl:fail`.

use std::fmt::Write as _;

use rdfa_harness_core::OracleError;
use rdfa_harness_core::TestRecord;
use rdfa_harness_core::VerificationOutcome;

use crate::presentation::escape_html;

/// Identifier of the harness as the asserting software.
pub const HARNESS_IRI: &str = "http://rdfa.digitalbazaar.com/rdfa-test-harness";

/// EARL outcome for one test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlOutcome {
    /// The expected marker was found.
    Pass,
    /// Wrong answer, error page, or unreachable service.
    Fail,
    /// The test could not be posed.
    NotTested,
}

impl EarlOutcome {
    /// Maps an oracle result to an outcome.
    #[must_use]
    pub const fn from_result(result: &Result<VerificationOutcome, OracleError>) -> Self {
        match result {
            Ok(outcome) if outcome.passed => Self::Pass,
            Ok(_) | Err(OracleError::QueryDocumentFetch(_) | OracleError::QueryEngineFetch(_)) => {
                Self::Fail
            }
            Err(OracleError::MalformedQueryRewrite { .. }) => Self::NotTested,
        }
    }

    /// Returns the outcome IRI.
    #[must_use]
    pub const fn iri(self) -> &'static str {
        match self {
            Self::Pass => "http://www.w3.org/ns/earl#pass",
            Self::Fail => "http://www.w3.org/ns/earl#fail",
            Self::NotTested => "http://www.w3.org/ns/earl#notTested",
        }
    }
}

/// One report row.
#[derive(Debug, Clone)]
pub struct EarlEntry {
    /// Manifest record.
    pub record: TestRecord,
    /// Outcome of verifying it.
    pub outcome: EarlOutcome,
}

/// Renders the report for `subject`, the extractor endpoint under test.
#[must_use]
pub fn earl_report(subject: &str, entries: &[EarlEntry]) -> String {
    let mut rdf = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<rdf:RDF xmlns:earl=\"http://www.w3.org/ns/earl#\"\n \
xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"\n \
xmlns:dc=\"http://purl.org/dc/terms/\"\n \
xmlns:foaf=\"http://xmlns.com/foaf/0.1/\">\n\n",
    );
    let _ = write!(
        rdf,
        "<earl:Software rdf:about=\"{HARNESS_IRI}\">\n \
<dc:title>RDFa Test Harness</dc:title>\n \
<dc:description>RDFa conformance test harness</dc:description>\n \
<foaf:homepage rdf:resource=\"{HARNESS_IRI}\" />\n\
</earl:Software>\n\n"
    );
    let subject = escape_html(subject);
    for entry in entries {
        let test = escape_html(&entry.record.source_uri);
        let number = entry.record.number;
        let _ = write!(
            rdf,
            "<earl:TestCase rdf:about=\"{test}\">\n \
<dc:title>Test Case #{number}</dc:title>\n \
<dc:description>{description}</dc:description>\n\
</earl:TestCase>\n\
<earl:Assertion rdf:about=\"{HARNESS_IRI}#unit-test-assertion-{number}\">\n \
<earl:assertedBy rdf:resource=\"{HARNESS_IRI}\"/>\n \
<earl:subject rdf:resource=\"{subject}\"/>\n \
<earl:test rdf:resource=\"{test}\"/>\n \
<earl:result rdf:parseType=\"Resource\">\n  \
<rdf:type rdf:resource=\"http://www.w3.org/ns/earl#TestResult\"/>\n  \
<earl:outcome rdf:resource=\"{outcome}\"/>\n \
</earl:result>\n\
</earl:Assertion>\n\n",
            description = escape_html(&entry.record.title),
            outcome = entry.outcome.iri(),
        );
    }
    rdf.push_str("</rdf:RDF>\n");
    rdf
}
