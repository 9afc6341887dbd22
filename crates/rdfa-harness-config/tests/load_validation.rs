//! Config load validation tests for rdfa-harness-config.
// crates/rdfa-harness-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, fields).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use rdfa_harness_config::AuditMode;
use rdfa_harness_config::ConfigError;
use rdfa_harness_config::HarnessConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<HarnessConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(HarnessConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        HarnessConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    assert_invalid(HarnessConfig::load(Some(Path::new("/nonexistent/rdfa-harness.toml"))), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&vec![b'a'; 1_048_577]).map_err(|err| err.to_string())?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    let file = write_config("[server\nbind = ")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_applies_defaults_for_omitted_sections() -> TestResult {
    let file = write_config("[corpus]\nroot = \"/srv/rdfa\"\nallow_refresh = true\n")?;
    let config = HarnessConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.corpus.root != "/srv/rdfa" || !config.corpus.allow_refresh {
        return Err("corpus section not applied".to_string());
    }
    if config.server.bind != "127.0.0.1:8080" || config.services.request_timeout_ms.is_some() {
        return Err("defaults not applied".to_string());
    }
    Ok(())
}

#[test]
fn load_reads_full_config() -> TestResult {
    let file = write_config(
        r#"
[server]
bind = "0.0.0.0:9000"
max_url_bytes = 2048

[corpus]
root = "."
base_test_case_url = "http://rdfa.test/test-suite/test-cases/"
refresh_command = ["git", "pull", "--ff-only"]

[services]
manifest_url = "http://rdfa.test/manifest.ttl"
rdfa_extractor = "http://extract.test/x?uri="
n3_extractor = "http://extract.test/n3?uri="
sparql_engine = "https://engine.test/sparql?query="
user_agent = "harness-test"
request_timeout_ms = 5000

[audit]
mode = "file"
path = "audit.log"
"#,
    )?;
    let config = HarnessConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.audit.mode != AuditMode::File || config.server.max_url_bytes != 2048 {
        return Err(format!("unexpected config: {config:?}"));
    }
    if config.services.request_timeout().map(|timeout| timeout.as_millis()) != Some(5000) {
        return Err("timeout not parsed".to_string());
    }
    Ok(())
}

#[test]
fn validate_rejects_base_url_without_trailing_slash() -> TestResult {
    let file = write_config("[corpus]\nbase_test_case_url = \"http://rdfa.test/cases\"\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "must end with '/'")
}

#[test]
fn validate_rejects_non_http_services() -> TestResult {
    let file = write_config("[services]\nsparql_engine = \"ftp://engine.test/q?query=\"\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "unsupported scheme")
}

#[test]
fn validate_rejects_bad_bind_address() -> TestResult {
    let file = write_config("[server]\nbind = \"localhost\"\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "server.bind")
}

#[test]
fn validate_rejects_empty_refresh_command() -> TestResult {
    let file = write_config("[corpus]\nrefresh_command = []\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "refresh_command")
}

#[test]
fn validate_requires_path_for_file_audit() -> TestResult {
    let file = write_config("[audit]\nmode = \"file\"\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "audit.path is required")
}

#[test]
fn validate_rejects_out_of_range_timeout() -> TestResult {
    let file = write_config("[services]\nrequest_timeout_ms = 1\n")?;
    assert_invalid(HarnessConfig::load(Some(file.path())), "request_timeout_ms")
}
