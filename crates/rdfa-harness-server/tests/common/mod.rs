// crates/rdfa-harness-server/tests/common/mod.rs
// ============================================================================
// Module: Server Test Helpers
// Description: Shared fixtures for harness server integration tests.
// Purpose: Provide canned fetchers, recording audit sinks, and corpora.
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across test binaries.")]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use rdfa_harness_core::FetchError;
use rdfa_harness_core::FetchedResource;
use rdfa_harness_core::Fetcher;
use rdfa_harness_server::Harness;
use rdfa_harness_server::HarnessAuditSink;
use rdfa_harness_server::HarnessSettings;
use rdfa_harness_server::audit::RefreshAuditEvent;
use rdfa_harness_server::audit::RequestAuditEvent;
use rdfa_harness_server::audit::VerificationAuditEvent;

pub const BASE_URL: &str = "http://harness.test/test-suite/test-cases/";
pub const MANIFEST_URL: &str = "http://ex.org/manifest.ttl";
pub const EXTRACTOR: &str = "http://extract.test/x?uri=";
pub const N3_EXTRACTOR: &str = "http://extract.test/n3?uri=";
pub const ENGINE: &str = "http://engine.test/sparql?query=";

pub const MANIFEST: &str = r#"
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix test: <http://www.w3.org/2006/03/test-description#> .

<#t2> dc:title "Second" ;
  test:informationResourceInput <http://ex.org/tests/0002.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0002.sparql> ;
  test:reviewStatus test:approved .

<#t1> dc:title "First <one>" ;
  test:informationResourceInput <http://ex.org/tests/0001.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0001.sparql> ;
  test:reviewStatus test:approved .

<#t5> dc:title "Broken query" ;
  test:informationResourceInput <http://ex.org/tests/0005.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0005.sparql> ;
  test:reviewStatus test:approved .
"#;

/// Fetcher answering from a fixed URL table.
#[derive(Debug, Default)]
pub struct CannedFetcher {
    /// URL to body.
    responses: BTreeMap<String, String>,
    /// Body returned for URLs starting with a prefix.
    prefixed: Vec<(String, String)>,
    /// URLs requested, in order.
    requests: Mutex<Vec<String>>,
}

impl CannedFetcher {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_prefix(mut self, prefix: &str, body: &str) -> Self {
        self.prefixed.push((prefix.to_string(), body.to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        let body = self.responses.get(url).cloned().or_else(|| {
            self.prefixed
                .iter()
                .find(|(prefix, _)| url.starts_with(prefix))
                .map(|(_, body)| body.clone())
        });
        body.map(|body| FetchedResource {
            bytes: body.into_bytes(),
            content_type: None,
        })
        .ok_or_else(|| FetchError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}

/// Fetcher for the manifest above: tests 1 and 2 pass, test 5 has no ASK.
pub fn manifest_fetcher() -> CannedFetcher {
    CannedFetcher::default()
        .with(MANIFEST_URL, MANIFEST)
        .with("http://ex.org/tests/0001.sparql", "ASK WHERE { ?s ?p ?o }")
        .with("http://ex.org/tests/0002.sparql", "ASK WHERE { ?s ?p ?o }")
        .with("http://ex.org/tests/0005.sparql", "SELECT * WHERE { ?s ?p ?o }")
        .with_prefix(ENGINE, "<sparql><boolean>true</boolean></sparql>")
}

/// Audit sink keeping every event as JSON.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Serialized events in arrival order.
    pub events: Mutex<Vec<serde_json::Value>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.events.lock().unwrap().clone()
    }

    pub fn of_kind(&self, kind: &str) -> Vec<serde_json::Value> {
        self.events().into_iter().filter(|event| event["event"] == kind).collect()
    }

    fn push<T: serde::Serialize>(&self, event: &T) {
        self.events.lock().unwrap().push(serde_json::to_value(event).unwrap());
    }
}

impl HarnessAuditSink for RecordingSink {
    fn record(&self, event: &RequestAuditEvent) {
        self.push(event);
    }

    fn record_verification(&self, event: &VerificationAuditEvent) {
        self.push(event);
    }

    fn record_refresh(&self, event: &RefreshAuditEvent) {
        self.push(event);
    }
}

pub fn settings(root: &Path) -> HarnessSettings {
    HarnessSettings {
        corpus_root: root.to_path_buf(),
        base_test_case_url: BASE_URL.to_string(),
        allow_refresh: false,
        refresh_command: vec!["git".to_string(), "pull".to_string()],
        max_url_bytes: 8192,
    }
}

pub fn harness(
    settings: HarnessSettings,
    fetcher: CannedFetcher,
) -> (Harness<CannedFetcher>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (Harness::new(settings, fetcher, sink.clone()), sink)
}

/// Writes a small template corpus under `root`.
pub fn write_corpus(root: &Path) {
    let tests = root.join("test-suite").join("tests");
    std::fs::create_dir_all(tests.join("html5")).unwrap();
    std::fs::write(
        tests.join("0001.txt"),
        "<head>\n<title>Test 0001</title>\n</head>\n<body>\n<a href=\"$TCPATH/0003.xhtml\">x</a>\n</body>\n",
    )
    .unwrap();
    std::fs::write(
        tests.join("html5").join("0001.sparql"),
        "ASK WHERE { <$TCPATH/0001.xhtml> ?p ?o }\n",
    )
    .unwrap();
}
