// crates/rdfa-harness-server/tests/harness_routes.rs
// ============================================================================
// Module: Harness Route Tests
// Description: End-to-end dispatch of harness routes over canned services.
// ============================================================================

//! ## Overview
//! Drives [`rdfa_harness_server::Harness::handle`] with a canned fetcher and
//! a temporary corpus, checking replies and audit events per route.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use common::BASE_URL;
use common::CannedFetcher;
use common::ENGINE;
use common::EXTRACTOR;
use common::MANIFEST_URL;
use common::N3_EXTRACTOR;
use common::harness;
use common::manifest_fetcher;
use common::settings;
use common::write_corpus;
use rdfa_harness_core::quote;

fn check_url(id: &str, expected: &str) -> String {
    format!(
        "/test-suite/check-test?id={id}&source={}&sparql={}&rdfa-extractor={}&sparql-engine={}&expected-result={expected}",
        quote("http://ex.org/tests/0001.xhtml"),
        quote("http://ex.org/tests/0001.sparql"),
        quote(EXTRACTOR),
        quote(ENGINE),
    )
}

// ============================================================================
// SECTION: Test Documents
// ============================================================================

#[test]
fn test_document_renders_from_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let reply = harness.handle("/test-suite/test-cases/html5/0001.html");
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type, "text/html");
    assert!(reply.body.starts_with("<!DOCTYPE html>\n<html>\n<head>"));
    assert!(reply.body.contains(&format!("{BASE_URL}html5/0003.html")));

    let sparql = harness.handle("/test-suite/test-cases/html5/0001.sparql");
    assert_eq!(sparql.content_type, "application/sparql-query");
    assert!(sparql.body.contains(&format!("<{BASE_URL}html5/0001.html>")));

    let events = sink.of_kind("harness_request");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["route"], "test_document");
    assert_eq!(events[0]["status"], 200);
}

#[test]
fn missing_template_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let reply = harness.handle("/test-suite/test-cases/xhtml1/0042.xhtml");
    assert_eq!(reply.status, 404);
    let mismatched = harness.handle("/test-suite/test-cases/svg/0001.html");
    assert_eq!(mismatched.status, 404);
    assert_eq!(sink.of_kind("harness_request")[0]["outcome"], "not_found");
}

#[test]
fn test_case_pages_render_inline() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, _sink) = harness(settings(dir.path()), CannedFetcher::default());

    let index = harness.handle("/test-suite/test-cases");
    assert_eq!(index.status, 200);
    assert!(index.body.contains("Test Cases"));

    let alternatives = harness.handle("/test-suite/test-cases/xhtml1/0007");
    assert!(alternatives.body.contains(&format!("{BASE_URL}svg/0007.svg")));

    let invalid = harness.handle("/test-suite/test-cases/a/b/c");
    assert_eq!(invalid.status, 200);
    assert!(invalid.body.starts_with("ERROR DOCUMENT: a/b/c"));
}

// ============================================================================
// SECTION: Manifest Listing
// ============================================================================

#[test]
fn retrieve_tests_lists_sorted_records() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, _sink) = harness(settings(dir.path()), manifest_fetcher());

    let url = format!("/test-suite/retrieve-tests?manifest={}&status=approved", quote(MANIFEST_URL));
    let reply = harness.handle(&url);
    assert_eq!(reply.status, 200);
    let first = reply.body.find("Test #1 (approved)").unwrap();
    let second = reply.body.find("Test #2 (approved)").unwrap();
    let fifth = reply.body.find("Test #5 (approved)").unwrap();
    assert!(first < second && second < fifth);
    assert!(reply.body.contains("First &lt;one&gt;"));
}

#[test]
fn manifest_failure_renders_inline_error() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let url = "/test-suite/retrieve-tests?manifest=http%3A//ex.org/missing.rdf&status=approved";
    let reply = harness.handle(url);
    assert_eq!(reply.status, 200);
    assert!(reply.body.contains("ERROR: manifest load failed"));
    assert_eq!(sink.of_kind("harness_request")[0]["outcome"], "inline_error");
}

// ============================================================================
// SECTION: Verification
// ============================================================================

#[test]
fn check_test_reports_pass_and_fail() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), manifest_fetcher());

    let pass = harness.handle(&check_url("1", "true"));
    assert!(pass.body.contains(">PASS</span>"));
    let fail = harness.handle(&check_url("1", "false"));
    assert!(fail.body.contains(">FAIL</span>"));

    let verifications = sink.of_kind("verification");
    assert_eq!(verifications.len(), 2);
    assert_eq!(verifications[0]["passed"], true);
    assert_eq!(verifications[1]["passed"], false);
    assert_eq!(verifications[1]["observed"], true);
}

#[test]
fn engine_error_page_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CannedFetcher::default()
        .with("http://ex.org/tests/0001.sparql", "ASK WHERE { ?s ?p ?o }")
        .with_prefix(ENGINE, "<html>Parse error</html>");
    let (harness, sink) = harness(settings(dir.path()), fetcher);

    for expected in ["true", "false"] {
        let reply = harness.handle(&check_url("1", expected));
        assert!(reply.body.contains(">FAIL</span>"));
    }
    assert!(sink.of_kind("verification").iter().all(|event| event["observed"].is_null()));
}

#[test]
fn unreachable_query_renders_inline_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let reply = harness.handle(&check_url("1", "true"));
    assert_eq!(reply.status, 200);
    assert!(reply.body.contains("ERROR: verification failed"));
    let verification = &sink.of_kind("verification")[0];
    assert!(verification["passed"].is_null());
    assert!(verification["error"].as_str().unwrap().contains("query document"));
}

#[test]
fn missing_and_invalid_parameters_render_inline() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let missing = harness.handle("/test-suite/check-test?id=1");
    assert_eq!(missing.status, 200);
    assert!(
        missing.body.contains("source, sparql, rdfa-extractor, sparql-engine, expected-result")
    );
    let invalid = harness.handle(&check_url("1", "maybe"));
    assert!(invalid.body.contains("invalid value for expected-result: maybe"));
    assert!(sink.of_kind("verification").is_empty());
}

#[test]
fn details_view_fetches_four_documents() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = CannedFetcher::default()
        .with("http://ex.org/tests/0001.sparql", "ASK WHERE { ?s ?p ?o }")
        .with("http://ex.org/tests/0001.xhtml", "<p property=\"dc:title\">T</p>")
        .with_prefix(N3_EXTRACTOR, "<> dc:title \"T\" .")
        .with_prefix(EXTRACTOR, "<rdf:RDF/>");
    let (harness, _sink) = harness(settings(dir.path()), fetcher);

    let url = format!(
        "/test-suite/test-details?id=1&xhtml={}&sparql={}&rdfa-extractor={}&n3-extractor={}",
        quote("http://ex.org/tests/0001.xhtml"),
        quote("http://ex.org/tests/0001.sparql"),
        quote(EXTRACTOR),
        quote(N3_EXTRACTOR),
    );
    let reply = harness.handle(&url);
    for section in ["Test #1 XHTML", "Test #1 N3", "Test #1 RDF", "Test #1 SPARQL"] {
        assert!(reply.body.contains(section), "{section}");
    }
    assert!(reply.body.contains("&lt;p property=&quot;dc:title&quot;&gt;T&lt;/p&gt;"));
}

// ============================================================================
// SECTION: EARL Report
// ============================================================================

#[test]
fn earl_report_covers_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), manifest_fetcher());

    let url = format!(
        "/test-suite/earl-report?manifest={}&status=approved&rdfa-extractor={}&sparql-engine={}",
        quote(MANIFEST_URL),
        quote(EXTRACTOR),
        quote(ENGINE),
    );
    let reply = harness.handle(&url);
    assert_eq!(reply.content_type, "application/rdf+xml");
    assert_eq!(reply.body.matches("<earl:Assertion ").count(), 3);
    assert_eq!(reply.body.matches("earl#pass").count(), 2);
    assert_eq!(reply.body.matches("earl#notTested").count(), 1);
    assert_eq!(sink.of_kind("verification").len(), 3);
}

// ============================================================================
// SECTION: Refresh and Rejections
// ============================================================================

#[test]
fn refresh_is_disabled_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let (harness, sink) = harness(settings(dir.path()), CannedFetcher::default());

    let reply = harness.handle("/test-suite/refresh");
    assert!(reply.body.contains("corpus refresh is disabled"));
    assert!(sink.of_kind("corpus_refresh").is_empty());
}

#[test]
fn refresh_runs_configured_command_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.allow_refresh = true;
    settings.refresh_command = vec!["rdfa-harness-no-such-program".to_string()];
    let (harness, sink) = harness(settings, CannedFetcher::default());

    let reply = harness.handle("/test-suite/refresh");
    assert!(reply.body.contains("corpus refresh failed"));
    let refresh = &sink.of_kind("corpus_refresh")[0];
    assert_eq!(refresh["success"], false);
}

#[test]
fn unknown_and_oversized_requests() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.max_url_bytes = 64;
    let (harness, sink) = harness(settings, CannedFetcher::default());

    let unknown = harness.handle("/elsewhere");
    assert_eq!(unknown.status, 200);
    assert!(unknown.body.contains("Unknown harness service: /elsewhere"));

    let long = format!("/test-suite/check-test?id={}", "9".repeat(100));
    let rejected = harness.handle(&long);
    assert_eq!(rejected.status, 414);
    assert_eq!(sink.of_kind("harness_request")[1]["outcome"], "rejected");
}
