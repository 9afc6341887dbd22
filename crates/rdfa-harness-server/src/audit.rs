// crates/rdfa-harness-server/src/audit.rs
// ============================================================================
// Module: RDFa Harness Audit Logging
// Description: Structured audit events for harness request handling.
// Purpose: Emit JSON-lines logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Sinks never fail
//! the request they describe; write errors are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rdfa_harness_config::AuditConfig;
use rdfa_harness_config::AuditMode;
use rdfa_harness_core::VerificationOutcome;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Response rendered normally.
    Ok,
    /// An inline error fragment was rendered.
    InlineError,
    /// The requested document does not exist.
    NotFound,
    /// The request URL was rejected before routing.
    Rejected,
}

/// Harness request audit event.
#[derive(Debug, Clone, Serialize)]
pub struct RequestAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Route label.
    pub route: &'static str,
    /// Request path, without the query string.
    pub path: String,
    /// HTTP status code sent.
    pub status: u16,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Handling time in milliseconds.
    pub elapsed_ms: u128,
}

/// Verification audit event, one per oracle call.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Caller-supplied test identifier.
    pub test_id: String,
    /// Markup document URI.
    pub source_uri: String,
    /// Expected answer.
    pub expected: &'static str,
    /// Whether the test passed; absent when the oracle errored.
    pub passed: Option<bool>,
    /// Boolean marker found in the engine response.
    pub observed: Option<bool>,
    /// Error message when the oracle failed.
    pub error: Option<String>,
}

/// Corpus refresh audit event.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Command line that was run.
    pub command: Vec<String>,
    /// Exit code when the command ran to completion.
    pub exit_code: Option<i32>,
    /// Whether the command succeeded.
    pub success: bool,
}

/// Inputs required to construct a request audit event.
pub struct RequestAuditEventParams {
    /// Route label.
    pub route: &'static str,
    /// Request path.
    pub path: String,
    /// HTTP status code.
    pub status: u16,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Handling time in milliseconds.
    pub elapsed_ms: u128,
}

/// Returns the current time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

impl RequestAuditEvent {
    /// Creates a new request audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: RequestAuditEventParams) -> Self {
        Self {
            event: "harness_request",
            timestamp_ms: now_ms(),
            route: params.route,
            path: params.path,
            status: params.status,
            outcome: params.outcome,
            response_bytes: params.response_bytes,
            elapsed_ms: params.elapsed_ms,
        }
    }
}

impl VerificationAuditEvent {
    /// Creates a verification event from an oracle result.
    #[must_use]
    pub fn new<E: std::fmt::Display>(
        test_id: &str,
        source_uri: &str,
        expected: &'static str,
        result: Result<&VerificationOutcome, &E>,
    ) -> Self {
        let (passed, observed, error) = match result {
            Ok(outcome) => (Some(outcome.passed), outcome.observed, None),
            Err(err) => (None, None, Some(err.to_string())),
        };
        Self {
            event: "verification",
            timestamp_ms: now_ms(),
            test_id: test_id.to_string(),
            source_uri: source_uri.to_string(),
            expected,
            passed,
            observed,
            error,
        }
    }
}

impl RefreshAuditEvent {
    /// Creates a refresh event.
    #[must_use]
    pub fn new(command: &[String], exit_code: Option<i32>, success: bool) -> Self {
        Self {
            event: "corpus_refresh",
            timestamp_ms: now_ms(),
            command: command.to_vec(),
            exit_code,
            success,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for harness events.
pub trait HarnessAuditSink: Send + Sync {
    /// Record a request event.
    fn record(&self, event: &RequestAuditEvent);

    /// Record a verification event.
    fn record_verification(&self, _event: &VerificationAuditEvent) {}

    /// Record a corpus refresh event.
    fn record_refresh(&self, _event: &RefreshAuditEvent) {}
}

/// Writes one serialized event as a JSON line.
fn write_line<W: Write, T: Serialize>(mut writer: W, event: &T) {
    if let Ok(payload) = serde_json::to_string(event) {
        let _ = writeln!(writer, "{payload}");
        let _ = writer.flush();
    }
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl HarnessAuditSink for StderrAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        write_line(io::stderr(), event);
    }

    fn record_verification(&self, event: &VerificationAuditEvent) {
        write_line(io::stderr(), event);
    }

    fn record_refresh(&self, event: &RefreshAuditEvent) {
        write_line(io::stderr(), event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event under the file lock.
    fn append<T: Serialize>(&self, event: &T) {
        if let Ok(mut file) = self.file.lock() {
            write_line(&mut *file, event);
        }
    }
}

impl HarnessAuditSink for FileAuditSink {
    fn record(&self, event: &RequestAuditEvent) {
        self.append(event);
    }

    fn record_verification(&self, event: &VerificationAuditEvent) {
        self.append(event);
    }

    fn record_refresh(&self, event: &RefreshAuditEvent) {
        self.append(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl HarnessAuditSink for NoopAuditSink {
    fn record(&self, _event: &RequestAuditEvent) {}
}

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error if a file sink cannot be opened.
pub fn sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn HarnessAuditSink>> {
    match (config.mode, config.path.as_deref()) {
        (AuditMode::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
        (AuditMode::File, Some(path)) => Ok(Arc::new(FileAuditSink::new(Path::new(path))?)),
        (AuditMode::File, None) => {
            Err(io::Error::new(io::ErrorKind::InvalidInput, "audit.path is required for file mode"))
        }
        (AuditMode::None, _) => Ok(Arc::new(NoopAuditSink)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
