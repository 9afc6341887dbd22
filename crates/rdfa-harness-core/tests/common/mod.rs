// crates/rdfa-harness-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for harness core integration tests.
// Purpose: Provide canned fetchers and local HTTP servers.
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across test binaries.")]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::thread;

use rdfa_harness_core::FetchError;
use rdfa_harness_core::FetchedResource;
use rdfa_harness_core::Fetcher;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// Turtle manifest with three approved tests out of order, one unreviewed
/// test, and one explicit `false` expectation.
pub const TURTLE_MANIFEST: &str = r#"
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix test: <http://www.w3.org/2006/03/test-description#> .

<#t3> dc:title "Third" ;
  test:informationResourceInput <http://ex.org/tests/0003.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0003.sparql> ;
  test:reviewStatus test:approved .

<#t1> dc:title "First" ;
  test:informationResourceInput <http://ex.org/tests/0001.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0001.sparql> ;
  test:reviewStatus test:approved .

<#t2> dc:title "Second" ;
  test:informationResourceInput <http://ex.org/tests/0002.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0002.sparql> ;
  test:reviewStatus test:approved ;
  test:expectedResults "false" .

<#t9> dc:title "Pending" ;
  test:informationResourceInput <http://ex.org/tests/0009.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0009.sparql> ;
  test:reviewStatus test:unreviewed .
"#;

/// Serves `body` with `content_type` for `count` requests on a local port.
pub fn serve(body: &str, content_type: &str, count: usize) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = body.to_string();
    let header = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes()).unwrap();
    let handle = thread::spawn(move || {
        for request in server.incoming_requests().take(count) {
            let response = Response::from_string(body.clone()).with_header(header.clone());
            let _ = request.respond(response);
        }
    });
    (format!("http://{addr}"), handle)
}

/// Fetcher answering from a fixed URL table and recording requests.
#[derive(Debug, Default)]
pub struct CannedFetcher {
    /// URL to body.
    responses: BTreeMap<String, String>,
    /// Body returned for URLs starting with a prefix.
    prefixed: Vec<(String, String)>,
    /// URLs requested, in order.
    pub requests: Mutex<Vec<String>>,
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
