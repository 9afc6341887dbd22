// crates/rdfa-harness-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests running the rdfa-harness binary.
// Purpose: Ensure commands succeed on valid input and fail closed otherwise.
// Dependencies: rdfa-harness-cli binary
// ============================================================================

//! ## Overview
//! Each test writes an explicit config file so ambient configuration never
//! leaks into the run. Remote services are local `tiny_http` servers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::thread;

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const MANIFEST: &str = r#"
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix test: <http://www.w3.org/2006/03/test-description#> .

<#t8> dc:title "Eighth" ;
  test:informationResourceInput <http://ex.org/tests/0008.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0008.sparql> ;
  test:reviewStatus test:approved .

<#t4> dc:title "Fourth" ;
  test:informationResourceInput <http://ex.org/tests/0004.xhtml> ;
  test:informationResourceResults <http://ex.org/tests/0004.sparql> ;
  test:reviewStatus test:approved ;
  test:expectedResults "false" .
"#;

fn harness_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rdfa-harness"))
}

fn run(args: &[&str]) -> Output {
    Command::new(harness_bin())
        .args(args)
        .env_remove("RDFA_HARNESS_CONFIG")
        .output()
        .expect("run rdfa-harness")
}

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("rdfa-harness.toml");
    let root = dir.display().to_string().replace('\\', "/");
    let contents = format!(
        "[corpus]\nroot = \"{root}\"\nbase_test_case_url = \"http://harness.test/test-cases/\"\n\n\
[audit]\nmode = \"none\"\n{extra}"
    );
    fs::write(&path, contents).unwrap();
    path
}

fn serve_manifest(count: usize) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = thread::spawn(move || {
        for request in server.incoming_requests().take(count) {
            let header = Header::from_bytes(&b"Content-Type"[..], &b"text/turtle"[..]).unwrap();
            let _ = request.respond(Response::from_string(MANIFEST).with_header(header));
        }
    });
    (format!("http://{addr}/manifest.ttl"), handle)
}

// ============================================================================
// SECTION: Config
// ============================================================================

#[test]
fn config_validate_accepts_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let output = run(&["config", "validate", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "config valid\n");
}

#[test]
fn config_validate_rejects_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[corpus]\nbase_test_case_url = \"http://harness.test/no-slash\"\n").unwrap();
    let output = run(&["config", "validate", "--config", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config load failed"));
}

// ============================================================================
// SECTION: Render
// ============================================================================

#[test]
fn render_prints_resolved_document() {
    let dir = tempfile::tempdir().unwrap();
    let tests = dir.path().join("test-suite").join("tests");
    fs::create_dir_all(&tests).unwrap();
    fs::write(tests.join("0002.txt"), "<head><title>2</title></head>\n<body>$TCPATH/0002</body>\n")
        .unwrap();
    let config = write_config(dir.path(), "");

    let output =
        run(&["render", "--config", config.to_str().unwrap(), "xhtml1", "0002.xhtml"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(stdout.contains("http://harness.test/test-cases/xhtml1/0002"));

    let missing = run(&["render", "--config", config.to_str().unwrap(), "xhtml1", "0003.xhtml"]);
    assert!(!missing.status.success());
    assert!(String::from_utf8_lossy(&missing.stderr).contains("not found"));
}

// ============================================================================
// SECTION: Manifest Commands
// ============================================================================

#[test]
fn list_prints_sorted_records_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let (manifest, handle) = serve_manifest(1);

    let output = run(&[
        "list",
        "--config",
        config.to_str().unwrap(),
        "--manifest",
        &manifest,
        "--format",
        "json",
    ]);
    handle.join().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let numbers: Vec<u64> =
        records.as_array().unwrap().iter().map(|record| record["number"].as_u64().unwrap()).collect();
    assert_eq!(numbers, vec![4, 8]);
    assert_eq!(records[0]["expected"], "false");
}

#[test]
fn list_fails_on_unreachable_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let output = run(&[
        "list",
        "--config",
        config.to_str().unwrap(),
        "--manifest",
        "ftp://ex.org/manifest.rdf",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("manifest fetch failed"));
}
