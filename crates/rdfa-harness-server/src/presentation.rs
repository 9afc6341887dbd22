// crates/rdfa-harness-server/src/presentation.rs
// ============================================================================
// Module: RDFa Harness Presentation
// Description: HTML fragments returned by harness routes.
// Purpose: Render records, outcomes, diagnostics, and inline errors.
// Dependencies: rdfa-harness-core
// ============================================================================

//! ## Overview
//! Every fragment is plain text assembly. Values that come from requests,
//! manifests, or remote services are escaped before they reach markup. The
//! client page drives the `checkUnitTest`, `showUnitTestDetails`, and
//! `hideUnitTestDetails` script hooks referenced here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use rdfa_harness_core::HostLanguage;
use rdfa_harness_core::TestDetails;
use rdfa_harness_core::TestRecord;
use rdfa_harness_core::VerificationOutcome;

use crate::refresh::RefreshReport;
use crate::routes::CheckTestParams;
use crate::routes::MissingParameters;

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for HTML element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escapes text for a single-quoted script string inside an attribute.
fn escape_script_string(text: &str) -> String {
    escape_html(&text.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Red, bold inline error span.
fn error_span(message: &str) -> String {
    format!(
        "<span style=\"text-decoration: underline; font-weight: bold; color: #f00\">ERROR: {}</span>",
        escape_html(message)
    )
}

// ============================================================================
// SECTION: Pages
// ============================================================================

/// Wraps body markup in the harness page skeleton.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML+RDFa 1.0//EN\"\n \
\"http://www.w3.org/MarkUp/DTD/xhtml-rdfa-1.dtd\">\n\
<html version=\"XHTML+RDFa 1.0\" xmlns=\"http://www.w3.org/1999/xhtml\"\n   \
xmlns:xhv=\"http://www.w3.org/1999/xhtml/vocab#\"\n   \
xmlns:dcterms=\"http://purl.org/dc/terms/\"\n   \
xmlns:test=\"http://www.w3.org/2006/03/test-description#\">\n\
   <head>\n      \
<meta http-equiv=\"Content-Type\" content=\"text/html;charset=utf-8\" />\n      \
<title>{}</title>\n   \
</head>\n   <body>\n{body}   </body>\n</html>\n",
        escape_html(title)
    )
}

/// Placeholder page for the test case index.
#[must_use]
pub fn test_case_index() -> String {
    page(
        "RDFa Test Suite: Test Cases",
        "   <p>\n      Browsing every test case is not available. Request a test case \
by number, for example <code>test-cases/xhtml1/0001</code>.\n   </p>\n",
    )
}

/// Links to every rendering of one test case.
#[must_use]
pub fn test_case_alternatives(base_test_case_url: &str, name: &str) -> String {
    let base = escape_html(base_test_case_url);
    let name = escape_html(name);
    let mut items = String::new();
    for family in HostLanguage::ALL {
        let _ = writeln!(
            items,
            "         <li><a href=\"{base}{family}/{name}.{ext}\">{label}</a></li>",
            family = family.as_str(),
            ext = family.markup_format().extension(),
            label = family.label(),
        );
    }
    for family in HostLanguage::ALL {
        let _ = writeln!(
            items,
            "         <li><a href=\"{base}{family}/{name}.sparql\">SPARQL for {label}</a></li>",
            family = family.as_str(),
            label = family.label(),
        );
    }
    page(
        "RDFa Test Suite: Select a Test Case Document",
        &format!(
            "   <p>\n      The following documents are associated with this test case:\n      \
<ul>\n{items}      </ul>\n   </p>\n"
        ),
    )
}

/// Error document for test case paths nested too deeply.
#[must_use]
pub fn invalid_document_path(segments: &[String]) -> String {
    format!("ERROR DOCUMENT: {}", escape_html(&segments.join("/")))
}

// ============================================================================
// SECTION: Test Records
// ============================================================================

/// One test entry in a listing.
#[must_use]
pub fn test_entry(record: &TestRecord, base_test_case_url: &str) -> String {
    let num = record.number;
    let source = escape_script_string(&record.source_uri);
    let sparql = escape_script_string(&record.query_uri);
    let expected = record.expected.as_str();
    format!(
        "\n<p class=\"unittest\">\n\
[<span id=\"unit-test-status-{num}\">\n    \
<a id=\"unit-test-anchor-{num}\"\n       \
href=\"javascript:checkUnitTest({num},'{source}','{sparql}','{expected}')\">\n       \
<span id=\"unit-test-result-{num}\">TEST</span></a>\n \
</span>]\n   \
Test #{num} ({status}): <span id=\"unit-test-description-{num}\">{title}</span>\n   \
[<span id=\"unit-test-details-status-{num}\">\n    \
<a href=\"javascript:showUnitTestDetails({num}, '{source}', '{sparql}')\">show details</a>\n     | \n    \
<a href=\"javascript:hideUnitTestDetails({num})\">hide details</a>\n     |\n    \
<a href=\"{base}{padded}\">source</a>\n    \
</span>\n    \
]<div style=\"margin-left: 50px\" id=\"unit-test-details-{num}\">\n    \
</div>\n</p>\n",
        status = escape_html(record.classification.as_str()),
        title = escape_html(&record.title),
        base = escape_html(base_test_case_url),
        padded = num.padded(),
    )
}

/// Full listing for a set of records.
#[must_use]
pub fn test_listing(records: &[TestRecord], base_test_case_url: &str) -> String {
    records.iter().map(|record| test_entry(record, base_test_case_url)).collect()
}

/// PASS or FAIL span for one check, re-runnable by the client.
#[must_use]
pub fn check_result(params: &CheckTestParams, outcome: &VerificationOutcome) -> String {
    let id = escape_html(&params.id);
    let source = escape_script_string(&params.source);
    let sparql = escape_script_string(&params.sparql);
    let expected = params.expected.as_str();
    let style = if outcome.passed {
        "text-decoration: underline; color: #090"
    } else {
        "text-decoration: underline; font-weight: bold; color: #f00"
    };
    format!(
        "<span id=\"unit-test-anchor-{id}\" style=\"{style}\" \
onclick=\"javascript:checkUnitTest('{script_id}', '{source}', '{sparql}', '{expected}')\">\
<span id=\"unit-test-result-{id}\">{label}</span></span>",
        script_id = escape_script_string(&params.id),
        label = outcome.status_label(),
    )
}

/// Four preformatted sections: source, N3, RDF, and query.
#[must_use]
pub fn details_view(details: &TestDetails) -> String {
    let id = escape_html(&details.id);
    let mut view = String::new();
    for (label, text) in [
        ("XHTML", &details.source_text),
        ("N3", &details.n3_text),
        ("RDF", &details.rdf_text),
        ("SPARQL", &details.query_text),
    ] {
        let _ = write!(view, "\n    <h3>Test #{id} {label}</h3>\n    <p><pre>\n{}\n</pre></p>", escape_html(text));
    }
    view.push('\n');
    view
}

// ============================================================================
// SECTION: Inline Errors
// ============================================================================

/// Lists the absent parameters of a request.
#[must_use]
pub fn missing_parameters(missing: &MissingParameters) -> String {
    error_span(&format!(
        "{} requires parameters that were not supplied: {}",
        missing.route.path(),
        missing.missing.join(", ")
    ))
}

/// A parameter value that could not be interpreted.
#[must_use]
pub fn invalid_parameter(name: &str, value: &str) -> String {
    error_span(&format!("invalid value for {name}: {value}"))
}

/// Unknown harness service.
#[must_use]
pub fn unknown_service(path: &str) -> String {
    format!("<b>ERROR: Unknown harness service: {}</b>", escape_html(path))
}

/// Request URL over the configured limit.
#[must_use]
pub fn url_too_long(length: usize, limit: usize) -> String {
    error_span(&format!("request url is {length} bytes, limit is {limit}"))
}

/// Failure while loading a manifest or talking to a service.
#[must_use]
pub fn failure(context: &str, message: &str) -> String {
    error_span(&format!("{context}: {message}"))
}

// ============================================================================
// SECTION: Corpus Refresh
// ============================================================================

/// Refresh disabled by configuration.
#[must_use]
pub fn refresh_disabled() -> String {
    error_span("corpus refresh is disabled")
}

/// Command status and captured output of a refresh.
#[must_use]
pub fn refresh_output(report: &RefreshReport) -> String {
    let status = match (report.success, report.exit_code) {
        (true, _) => "updated".to_string(),
        (false, Some(code)) => format!("failed with exit code {code}"),
        (false, None) => "terminated by signal".to_string(),
    };
    format!(
        "<h3>{}</h3>\n<p>{status}</p>\n<pre>\n{}{}</pre>\n",
        escape_html(&report.command.join(" ")),
        escape_html(&report.stdout),
        escape_html(&report.stderr),
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================
