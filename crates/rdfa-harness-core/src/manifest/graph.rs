// crates/rdfa-harness-core/src/manifest/graph.rs
// ============================================================================
// Module: RDFa Harness Manifest Graph
// Description: In-memory triple index for test manifests.
// Purpose: Parse RDF manifests and answer the test-entry selection query.
// Dependencies: oxrdf, oxrdfio, url
// ============================================================================

//! ## Overview
//! [`ManifestGraph`] indexes manifest triples by subject and predicate and
//! answers one fixed selection, equivalent to:
//!
//! ```text
//! SELECT ?input ?results ?title ?status ?expected
//! WHERE {
//!   ?t dc:title ?title .
//!   ?t test:informationResourceInput ?input .
//!   ?t test:informationResourceResults ?results .
//!   ?t test:reviewStatus ?status .
//!   OPTIONAL { ?t test:expectedResults ?expected }
//! }
//! ```
//!
//! Join semantics follow SPARQL: a subject with several values for a
//! property yields one row per combination, and a subject missing a required
//! property yields no row.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use oxrdf::Term;
use oxrdfio::RdfFormat;
use oxrdfio::RdfParser;
use url::Url;

use crate::manifest::ManifestError;

// ============================================================================
// SECTION: Vocabulary
// ============================================================================

/// Dublin Core elements title.
pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";
/// Dublin Core terms title, used only when a subject has no `dc:title`.
pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
/// Test description namespace.
pub const TEST_NS: &str = "http://www.w3.org/2006/03/test-description#";

/// Builds a term IRI in the test description namespace.
fn test_term(local: &str) -> String {
    format!("{TEST_NS}{local}")
}

// ============================================================================
// SECTION: Rows
// ============================================================================

/// One solution of the test-entry selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    /// `dc:title` value.
    pub title: String,
    /// `test:informationResourceInput` value.
    pub input: String,
    /// `test:informationResourceResults` value.
    pub results: String,
    /// `test:reviewStatus` value.
    pub status: String,
    /// Optional `test:expectedResults` value.
    pub expected: Option<String>,
}

// ============================================================================
// SECTION: Graph
// ============================================================================

/// Property values keyed by predicate IRI.
type Properties = BTreeMap<String, Vec<String>>;

/// Manifest triples indexed by subject.
#[derive(Debug, Clone, Default)]
pub struct ManifestGraph {
    /// Subject (N-Triples form) to property values.
    subjects: BTreeMap<String, Properties>,
    /// Number of triples indexed.
    triple_count: usize,
}

impl ManifestGraph {
    /// Parses manifest bytes in the given RDF syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] on syntax errors or an invalid base IRI.
    pub fn parse(
        bytes: &[u8],
        format: RdfFormat,
        base_iri: Option<&str>,
    ) -> Result<Self, ManifestError> {
        let mut parser = RdfParser::from_format(format);
        if let Some(base) = base_iri {
            parser = parser
                .with_base_iri(base)
                .map_err(|err| ManifestError::Parse(format!("invalid base iri: {err}")))?;
        }
        let mut graph = Self::default();
        for quad in parser.for_reader(bytes) {
            let quad = quad.map_err(|err| ManifestError::Parse(err.to_string()))?;
            let value = match &quad.object {
                Term::NamedNode(node) => node.as_str().to_string(),
                Term::Literal(literal) => literal.value().to_string(),
                _ => continue,
            };
            graph.insert(quad.subject.to_string(), quad.predicate.as_str().to_string(), value);
        }
        Ok(graph)
    }

    /// Adds one triple to the index.
    pub fn insert(&mut self, subject: String, predicate: String, object: String) {
        self.subjects.entry(subject).or_default().entry(predicate).or_default().push(object);
        self.triple_count += 1;
    }

    /// Returns the number of indexed triples.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.triple_count
    }

    /// Returns true when no triples were indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.triple_count == 0
    }

    /// Runs the test-entry selection over the graph.
    #[must_use]
    pub fn select_test_entries(&self) -> Vec<ManifestRow> {
        let input_iri = test_term("informationResourceInput");
        let results_iri = test_term("informationResourceResults");
        let status_iri = test_term("reviewStatus");
        let expected_iri = test_term("expectedResults");
        let mut rows = Vec::new();
        for properties in self.subjects.values() {
            let titles = match values(properties, DC_TITLE) {
                [] => values(properties, DCTERMS_TITLE),
                present => present,
            };
            let inputs = values(properties, &input_iri);
            let results = values(properties, &results_iri);
            let statuses = values(properties, &status_iri);
            let expected: Vec<Option<&String>> = match values(properties, &expected_iri) {
                [] => vec![None],
                present => present.iter().map(Some).collect(),
            };
            for title in titles {
                for input in inputs {
                    for result in results {
                        for status in statuses {
                            for flag in &expected {
                                rows.push(ManifestRow {
                                    title: title.clone(),
                                    input: input.clone(),
                                    results: result.clone(),
                                    status: status.clone(),
                                    expected: flag.cloned(),
                                });
                            }
                        }
                    }
                }
            }
        }
        rows
    }
}

/// Returns the values of a property, or an empty slice.
fn values<'a>(properties: &'a Properties, predicate: &str) -> &'a [String] {
    properties.get(predicate).map_or(&[], Vec::as_slice)
}

// ============================================================================
// SECTION: Format Detection
// ============================================================================

/// Media types static hosts send for any file; they carry no syntax hint.
const GENERIC_MEDIA_TYPES: [&str; 4] =
    ["text/plain", "application/octet-stream", "text/html", "application/xml"];

/// Chooses the RDF syntax for a manifest.
///
/// An RDF-specific response media type wins, then the URI path extension;
/// RDF/XML is the fallback since published test manifests are RDF/XML.
#[must_use]
pub fn detect_format(content_type: Option<&str>, uri: &str) -> RdfFormat {
    if let Some(media_type) = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty() && !GENERIC_MEDIA_TYPES.contains(&value.as_str()))
        && let Some(format) = RdfFormat::from_media_type(&media_type)
    {
        return format;
    }
    let path = Url::parse(uri).map_or_else(|_| uri.to_string(), |url| url.path().to_string());
    path.rsplit_once('.')
        .and_then(|(_, extension)| RdfFormat::from_extension(extension))
        .unwrap_or(RdfFormat::RdfXml)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
