// crates/rdfa-harness-server/src/harness.rs
// ============================================================================
// Module: RDFa Harness Request Handling
// Description: Dispatches resolved routes to the verification pipeline.
// Purpose: Turn one request URL into one reply with audit coverage.
// Dependencies: rdfa-harness-config, rdfa-harness-core
// ============================================================================

//! ## Overview
//! [`Harness::handle`] resolves the request URL into a [`Route`] and renders
//! exactly one [`HttpReply`]. Manifest, oracle, and details failures render
//! inline error fragments with status 200; only resolver misses produce 404
//! and oversized URLs 414.
//! Invariants:
//! - One `harness_request` audit event per handled request.
//! - One `verification` audit event per oracle call, including each record
//!   of an EARL report.
//! - The refresh command runs only when enabled by configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rdfa_harness_config::HarnessConfig;
use rdfa_harness_core::DetailsRequest;
use rdfa_harness_core::Fetcher;
use rdfa_harness_core::ManifestLoader;
use rdfa_harness_core::OracleError;
use rdfa_harness_core::ResolveError;
use rdfa_harness_core::TestDocumentResolver;
use rdfa_harness_core::TestNumber;
use rdfa_harness_core::TestRecord;
use rdfa_harness_core::VerificationOracle;
use rdfa_harness_core::VerificationOutcome;
use rdfa_harness_core::VerificationRequest;
use rdfa_harness_core::fetch_details;

use crate::audit::HarnessAuditSink;
use crate::audit::RefreshAuditEvent;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::RequestOutcome;
use crate::audit::VerificationAuditEvent;
use crate::earl::EarlEntry;
use crate::earl::EarlOutcome;
use crate::earl::earl_report;
use crate::presentation;
use crate::refresh::run_refresh;
use crate::routes::CheckTestParams;
use crate::routes::EarlReportParams;
use crate::routes::RetrieveTestsParams;
use crate::routes::Route;
use crate::routes::TestDetailsParams;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Content type of harness HTML fragments.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
/// Content type of EARL reports.
pub const EARL_CONTENT_TYPE: &str = "application/rdf+xml";
/// Content type of resolver misses.
const PLAIN_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
/// Longest request path recorded in audit events.
const MAX_AUDIT_PATH_CHARS: usize = 512;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Reply for one harness request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response content type.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl HttpReply {
    /// HTML reply with status 200.
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: HTML_CONTENT_TYPE,
            body,
        }
    }
}

/// Request-independent harness settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessSettings {
    /// Template corpus root.
    pub corpus_root: PathBuf,
    /// Base URL substituted for the test case placeholder.
    pub base_test_case_url: String,
    /// Whether the refresh route may run the refresh command.
    pub allow_refresh: bool,
    /// Refresh command line.
    pub refresh_command: Vec<String>,
    /// Longest accepted request URL.
    pub max_url_bytes: usize,
}

impl HarnessSettings {
    /// Extracts the settings from a validated configuration.
    #[must_use]
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            corpus_root: config.corpus.root_path(),
            base_test_case_url: config.corpus.base_test_case_url.clone(),
            allow_refresh: config.corpus.allow_refresh,
            refresh_command: config.corpus.refresh_command.clone(),
            max_url_bytes: config.server.max_url_bytes,
        }
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Request handler for the harness HTTP surface.
pub struct Harness<F> {
    /// Settings captured at construction.
    settings: HarnessSettings,
    /// Fetcher shared by manifest, oracle, and details calls.
    fetcher: F,
    /// Template corpus resolver.
    resolver: TestDocumentResolver,
    /// Audit sink.
    audit: Arc<dyn HarnessAuditSink>,
}

impl<F: Fetcher> Harness<F> {
    /// Creates a harness.
    #[must_use]
    pub fn new(settings: HarnessSettings, fetcher: F, audit: Arc<dyn HarnessAuditSink>) -> Self {
        let resolver = TestDocumentResolver::new(
            settings.corpus_root.clone(),
            settings.base_test_case_url.clone(),
        );
        Self {
            settings,
            fetcher,
            resolver,
            audit,
        }
    }

    /// Returns the harness settings.
    #[must_use]
    pub const fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    /// Handles one request URL (path plus optional query string).
    #[must_use]
    pub fn handle(&self, url: &str) -> HttpReply {
        let started = Instant::now();
        let route = Route::resolve(url, self.settings.max_url_bytes);
        let (reply, outcome) = self.dispatch(&route);
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        self.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
            route: route.label(),
            path: path.chars().take(MAX_AUDIT_PATH_CHARS).collect(),
            status: reply.status,
            outcome,
            response_bytes: reply.body.len(),
            elapsed_ms: started.elapsed().as_millis(),
        }));
        reply
    }

    /// Renders the reply for a resolved route.
    fn dispatch(&self, route: &Route) -> (HttpReply, RequestOutcome) {
        match route {
            Route::TestCaseIndex => ok(presentation::test_case_index()),
            Route::TestDocument {
                family,
                filename,
            } => self.test_document(family, filename),
            Route::TestCaseAlternatives {
                name,
            } => ok(presentation::test_case_alternatives(&self.settings.base_test_case_url, name)),
            Route::InvalidDocumentPath {
                segments,
            } => inline_error(presentation::invalid_document_path(segments)),
            Route::RetrieveTests(params) => self.retrieve_tests(params),
            Route::CheckTest(params) => self.check_test(params),
            Route::TestDetails(params) => self.test_details(params),
            Route::EarlReport(params) => self.earl(params),
            Route::RefreshCorpus => self.refresh(),
            Route::MissingParameters(missing) => {
                inline_error(presentation::missing_parameters(missing))
            }
            Route::InvalidParameter {
                name,
                value,
            } => inline_error(presentation::invalid_parameter(name, value)),
            Route::UrlTooLong {
                length,
            } => (
                HttpReply {
                    status: 414,
                    content_type: HTML_CONTENT_TYPE,
                    body: presentation::url_too_long(*length, self.settings.max_url_bytes),
                },
                RequestOutcome::Rejected,
            ),
            Route::Unknown {
                path,
            } => inline_error(presentation::unknown_service(path)),
        }
    }

    /// Renders one test document from the corpus.
    fn test_document(&self, family: &str, filename: &str) -> (HttpReply, RequestOutcome) {
        match self.resolver.resolve(&[family, filename]) {
            Ok(document) => (
                HttpReply {
                    status: 200,
                    content_type: document.content_type,
                    body: document.body,
                },
                RequestOutcome::Ok,
            ),
            Err(ResolveError::NotFound(_)) => (
                HttpReply {
                    status: 404,
                    content_type: PLAIN_CONTENT_TYPE,
                    body: format!("test document not found: {family}/{filename}\n"),
                },
                RequestOutcome::NotFound,
            ),
            Err(err @ ResolveError::Io(_)) => (
                HttpReply {
                    status: 500,
                    content_type: HTML_CONTENT_TYPE,
                    body: presentation::failure("test document", &err.to_string()),
                },
                RequestOutcome::InlineError,
            ),
        }
    }

    /// Lists the matching records of a manifest.
    fn retrieve_tests(&self, params: &RetrieveTestsParams) -> (HttpReply, RequestOutcome) {
        match ManifestLoader::new(&self.fetcher).load_test_cases(&params.manifest, &params.status) {
            Ok(records) => {
                ok(presentation::test_listing(&records, &self.settings.base_test_case_url))
            }
            Err(err) => inline_error(presentation::failure("manifest load failed", &err.to_string())),
        }
    }

    /// Verifies one test case.
    fn check_test(&self, params: &CheckTestParams) -> (HttpReply, RequestOutcome) {
        let request = VerificationRequest {
            number: TestNumber::from_stem(&params.id),
            extractor_endpoint: &params.rdfa_extractor,
            query_endpoint: &params.sparql_engine,
            source_uri: &params.source,
            query_uri: &params.sparql,
            expected: params.expected,
        };
        let result = VerificationOracle::new(&self.fetcher).verify(&request);
        self.audit.record_verification(&VerificationAuditEvent::new(
            &params.id,
            &params.source,
            params.expected.as_str(),
            result.as_ref(),
        ));
        match result {
            Ok(outcome) => ok(presentation::check_result(params, &outcome)),
            Err(err) => inline_error(presentation::failure("verification failed", &err.to_string())),
        }
    }

    /// Fetches the diagnostics view for one test.
    fn test_details(&self, params: &TestDetailsParams) -> (HttpReply, RequestOutcome) {
        let request = DetailsRequest {
            id: &params.id,
            rdf_extractor: &params.rdfa_extractor,
            n3_extractor: &params.n3_extractor,
            source_uri: &params.source,
            query_uri: &params.sparql,
        };
        match fetch_details(&self.fetcher, &request) {
            Ok(details) => ok(presentation::details_view(&details)),
            Err(err) => inline_error(presentation::failure("test details failed", &err.to_string())),
        }
    }

    /// Verifies every matching record and renders an EARL report.
    fn earl(&self, params: &EarlReportParams) -> (HttpReply, RequestOutcome) {
        let records = match ManifestLoader::new(&self.fetcher)
            .load_test_cases(&params.manifest, &params.status)
        {
            Ok(records) => records,
            Err(err) => {
                return inline_error(presentation::failure(
                    "manifest load failed",
                    &err.to_string(),
                ));
            }
        };
        let entries = verify_records(
            &self.fetcher,
            &records,
            &params.rdfa_extractor,
            &params.sparql_engine,
            |record, result| {
                self.audit.record_verification(&VerificationAuditEvent::new(
                    &record.number.to_string(),
                    &record.source_uri,
                    record.expected.as_str(),
                    result.as_ref(),
                ));
            },
        );
        (
            HttpReply {
                status: 200,
                content_type: EARL_CONTENT_TYPE,
                body: earl_report(&params.rdfa_extractor, &entries),
            },
            RequestOutcome::Ok,
        )
    }

    /// Runs the corpus refresh command when enabled.
    fn refresh(&self) -> (HttpReply, RequestOutcome) {
        if !self.settings.allow_refresh {
            return inline_error(presentation::refresh_disabled());
        }
        match run_refresh(&self.settings.corpus_root, &self.settings.refresh_command) {
            Ok(report) => {
                self.audit.record_refresh(&RefreshAuditEvent::new(
                    &report.command,
                    report.exit_code,
                    report.success,
                ));
                let body = presentation::refresh_output(&report);
                if report.success { ok(body) } else { inline_error(body) }
            }
            Err(err) => {
                self.audit.record_refresh(&RefreshAuditEvent::new(
                    &self.settings.refresh_command,
                    None,
                    false,
                ));
                inline_error(presentation::failure("corpus refresh failed", &err.to_string()))
            }
        }
    }
}

// ============================================================================
// SECTION: Batch Verification
// ============================================================================

/// Verifies `records` one at a time, reporting each result to `observe`.
///
/// Calls are sequential and independent; a failure never stops the batch.
pub fn verify_records<F, O>(
    fetcher: &F,
    records: &[TestRecord],
    extractor_endpoint: &str,
    query_endpoint: &str,
    mut observe: O,
) -> Vec<EarlEntry>
where
    F: Fetcher,
    O: FnMut(&TestRecord, &Result<VerificationOutcome, OracleError>),
{
    let oracle = VerificationOracle::new(fetcher);
    records
        .iter()
        .map(|record| {
            let request = VerificationRequest::for_record(record, extractor_endpoint, query_endpoint);
            let result = oracle.verify(&request);
            observe(record, &result);
            EarlEntry {
                record: record.clone(),
                outcome: EarlOutcome::from_result(&result),
            }
        })
        .collect()
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Successful HTML reply.
fn ok(body: String) -> (HttpReply, RequestOutcome) {
    (HttpReply::html(body), RequestOutcome::Ok)
}

/// Inline error HTML reply; still status 200.
fn inline_error(body: String) -> (HttpReply, RequestOutcome) {
    (HttpReply::html(body), RequestOutcome::InlineError)
}
