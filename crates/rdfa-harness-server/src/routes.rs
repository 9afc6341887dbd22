// crates/rdfa-harness-server/src/routes.rs
// ============================================================================
// Module: RDFa Harness Request Router
// Description: Typed routes and parameters for harness requests.
// Purpose: Resolve a request URL into one route exactly once per request.
// Dependencies: rdfa-harness-core
// ============================================================================

//! ## Overview
//! Every request URL becomes a [`Route`]. Routes that need parameters carry
//! a typed parameter struct; when any required parameter is absent the
//! request resolves to [`Route::MissingParameters`] listing every absent
//! name in declaration order.
//!
//! Query strings are flat `key=value` pairs split on `&` and the first `=`.
//! Keys and values are percent-decoded; `+` stays a literal plus. Pairs
//! without `=` are ignored and repeated keys keep the last value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use rdfa_harness_core::ExpectedResult;
use rdfa_harness_core::unquote;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix for test case documents.
const TEST_CASES_PREFIX: &str = "/test-suite/test-cases";

/// Extensions that name a test document rather than a test case.
const DOCUMENT_EXTENSIONS: [&str; 4] = [".xhtml", ".html", ".svg", ".sparql"];

// ============================================================================
// SECTION: Query Parameters
// ============================================================================

/// Decoded query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Decoded key to decoded value.
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parses a raw query string.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let values = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(key, value)| (unquote(key), unquote(value)))
            .collect();
        Self {
            values,
        }
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Collects required parameters, remembering which are missing.
struct Required<'a> {
    /// Parsed parameters.
    params: &'a QueryParams,
    /// Absent names in request order.
    missing: Vec<&'static str>,
}

impl<'a> Required<'a> {
    /// Starts a collection over `params`.
    const fn new(params: &'a QueryParams) -> Self {
        Self {
            params,
            missing: Vec::new(),
        }
    }

    /// Takes the first present key among `keys`; records `keys[0]` if none.
    fn take(&mut self, keys: &[&'static str]) -> String {
        match keys.iter().find_map(|key| self.params.get(key)) {
            Some(value) => value.to_string(),
            None => {
                if let Some(name) = keys.first() {
                    self.missing.push(*name);
                }
                String::new()
            }
        }
    }

    /// Finishes the collection.
    fn finish<T>(self, kind: RouteKind, value: T) -> Result<T, MissingParameters> {
        if self.missing.is_empty() {
            Ok(value)
        } else {
            Err(MissingParameters {
                route: kind,
                missing: self.missing,
            })
        }
    }
}

// ============================================================================
// SECTION: Route Parameters
// ============================================================================

/// Parameters for listing tests from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieveTestsParams {
    /// Manifest URL.
    pub manifest: String,
    /// Classification filter.
    pub status: String,
}

/// Parameters for checking one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTestParams {
    /// Client-side test identifier.
    pub id: String,
    /// Markup document URI.
    pub source: String,
    /// Query document URI.
    pub sparql: String,
    /// Extractor endpoint prefix.
    pub rdfa_extractor: String,
    /// Query engine endpoint prefix.
    pub sparql_engine: String,
    /// Expected answer.
    pub expected: ExpectedResult,
}

/// Parameters for the diagnostics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDetailsParams {
    /// Client-side test identifier.
    pub id: String,
    /// Markup document URI (`xhtml`, or `source`).
    pub source: String,
    /// Query document URI.
    pub sparql: String,
    /// RDF/XML extractor endpoint prefix.
    pub rdfa_extractor: String,
    /// N3 extractor endpoint prefix.
    pub n3_extractor: String,
}

/// Parameters for an EARL report over a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlReportParams {
    /// Manifest URL.
    pub manifest: String,
    /// Classification filter.
    pub status: String,
    /// Extractor endpoint prefix.
    pub rdfa_extractor: String,
    /// Query engine endpoint prefix.
    pub sparql_engine: String,
}

/// Routes that declare required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// `/test-suite/retrieve-tests`.
    RetrieveTests,
    /// `/test-suite/check-test`.
    CheckTest,
    /// `/test-suite/test-details`.
    TestDetails,
    /// `/test-suite/earl-report`.
    EarlReport,
}

impl RouteKind {
    /// Returns the route path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::RetrieveTests => "/test-suite/retrieve-tests",
            Self::CheckTest => "/test-suite/check-test",
            Self::TestDetails => "/test-suite/test-details",
            Self::EarlReport => "/test-suite/earl-report",
        }
    }
}

/// Absent required parameters for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParameters {
    /// Route that was requested.
    pub route: RouteKind,
    /// Absent parameter names in declaration order.
    pub missing: Vec<&'static str>,
}

// ============================================================================
// SECTION: Route
// ============================================================================

/// A resolved harness request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Test case index placeholder.
    TestCaseIndex,
    /// One rendered test document: `[family, filename]`.
    TestDocument {
        /// Syntax family segment.
        family: String,
        /// Filename segment.
        filename: String,
    },
    /// Links to every document of one test case.
    TestCaseAlternatives {
        /// Test case name segment.
        name: String,
    },
    /// A test case path nested too deeply.
    InvalidDocumentPath {
        /// Segments after the test case prefix.
        segments: Vec<String>,
    },
    /// Manifest listing.
    RetrieveTests(RetrieveTestsParams),
    /// Single test verification.
    CheckTest(CheckTestParams),
    /// Diagnostics view.
    TestDetails(TestDetailsParams),
    /// EARL report for a manifest.
    EarlReport(EarlReportParams),
    /// Corpus refresh.
    RefreshCorpus,
    /// A parameterized route missing parameters.
    MissingParameters(MissingParameters),
    /// A parameter value that cannot be interpreted.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
    /// Request URL longer than the configured limit.
    UrlTooLong {
        /// URL length in bytes.
        length: usize,
    },
    /// Anything else.
    Unknown {
        /// Requested path.
        path: String,
    },
}

impl Route {
    /// Resolves a request URL (path plus optional query string).
    #[must_use]
    pub fn resolve(url: &str, max_url_bytes: usize) -> Self {
        if url.len() > max_url_bytes {
            return Self::UrlTooLong {
                length: url.len(),
            };
        }
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let params = QueryParams::parse(query);
        if let Some(rest) = path.strip_prefix(TEST_CASES_PREFIX)
            && (rest.is_empty() || rest.starts_with('/'))
        {
            return Self::test_case_route(rest);
        }
        let resolved = match path {
            "/test-suite/retrieve-tests" => retrieve_tests(&params).map(Self::RetrieveTests),
            "/test-suite/check-test" => check_test(&params),
            "/test-suite/test-details" => test_details(&params).map(Self::TestDetails),
            "/test-suite/earl-report" => earl_report(&params).map(Self::EarlReport),
            "/test-suite/refresh" => Ok(Self::RefreshCorpus),
            _ => Ok(Self::Unknown {
                path: path.to_string(),
            }),
        };
        resolved.unwrap_or_else(Self::MissingParameters)
    }

    /// Resolves the part of a path after `/test-suite/test-cases`.
    fn test_case_route(rest: &str) -> Self {
        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            [_] | [_, _] => Self::TestCaseIndex,
            [_, family, filename] => {
                if DOCUMENT_EXTENSIONS.iter().any(|extension| filename.ends_with(extension)) {
                    Self::TestDocument {
                        family: (*family).to_string(),
                        filename: (*filename).to_string(),
                    }
                } else {
                    Self::TestCaseAlternatives {
                        name: (*filename).to_string(),
                    }
                }
            }
            _ => Self::InvalidDocumentPath {
                segments: segments.iter().skip(1).map(|segment| (*segment).to_string()).collect(),
            },
        }
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TestCaseIndex => "test_case_index",
            Self::TestDocument { .. } => "test_document",
            Self::TestCaseAlternatives { .. } => "test_case_alternatives",
            Self::InvalidDocumentPath { .. } => "invalid_document_path",
            Self::RetrieveTests(_) => "retrieve_tests",
            Self::CheckTest(_) => "check_test",
            Self::TestDetails(_) => "test_details",
            Self::EarlReport(_) => "earl_report",
            Self::RefreshCorpus => "refresh_corpus",
            Self::MissingParameters(_) => "missing_parameters",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::UrlTooLong { .. } => "url_too_long",
            Self::Unknown { .. } => "unknown",
        }
    }
}

// ============================================================================
// SECTION: Parameter Extraction
// ============================================================================

/// Extracts listing parameters.
fn retrieve_tests(params: &QueryParams) -> Result<RetrieveTestsParams, MissingParameters> {
    let mut required = Required::new(params);
    let manifest = required.take(&["manifest"]);
    let status = required.take(&["status"]);
    required.finish(RouteKind::RetrieveTests, RetrieveTestsParams {
        manifest,
        status,
    })
}

/// Extracts check parameters and parses the expected flag.
fn check_test(params: &QueryParams) -> Result<Route, MissingParameters> {
    let mut required = Required::new(params);
    let id = required.take(&["id"]);
    let source = required.take(&["source"]);
    let sparql = required.take(&["sparql"]);
    let rdfa_extractor = required.take(&["rdfa-extractor"]);
    let sparql_engine = required.take(&["sparql-engine"]);
    let expected_raw = required.take(&["expected-result"]);
    required.finish(RouteKind::CheckTest, ())?;
    let Some(expected) = ExpectedResult::parse(&expected_raw) else {
        return Ok(Route::InvalidParameter {
            name: "expected-result",
            value: expected_raw,
        });
    };
    Ok(Route::CheckTest(CheckTestParams {
        id,
        source,
        sparql,
        rdfa_extractor,
        sparql_engine,
        expected,
    }))
}

/// Extracts diagnostics parameters.
fn test_details(params: &QueryParams) -> Result<TestDetailsParams, MissingParameters> {
    let mut required = Required::new(params);
    let id = required.take(&["id"]);
    let source = required.take(&["xhtml", "source"]);
    let sparql = required.take(&["sparql"]);
    let rdfa_extractor = required.take(&["rdfa-extractor"]);
    let n3_extractor = required.take(&["n3-extractor"]);
    required.finish(RouteKind::TestDetails, TestDetailsParams {
        id,
        source,
        sparql,
        rdfa_extractor,
        n3_extractor,
    })
}

/// Extracts EARL report parameters.
fn earl_report(params: &QueryParams) -> Result<EarlReportParams, MissingParameters> {
    let mut required = Required::new(params);
    let manifest = required.take(&["manifest"]);
    let status = required.take(&["status"]);
    let rdfa_extractor = required.take(&["rdfa-extractor"]);
    let sparql_engine = required.take(&["sparql-engine"]);
    required.finish(RouteKind::EarlReport, EarlReportParams {
        manifest,
        status,
        rdfa_extractor,
        sparql_engine,
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
