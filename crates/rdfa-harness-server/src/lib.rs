// crates/rdfa-harness-server/src/lib.rs
// ============================================================================
// Module: RDFa Harness Server
// Description: HTTP surface for the RDFa conformance harness.
// Purpose: Route requests to the verification pipeline and render replies.
// Dependencies: rdfa-harness-core, rdfa-harness-config, tiny_http
// ============================================================================

//! ## Overview
//! The server resolves each request URL into a typed route, runs the
//! matching core operation, and renders an HTML fragment, a test document,
//! or an EARL report. Requests are handled one at a time on the calling
//! thread.
//! Security posture: request paths, query parameters, and remote service
//! responses are untrusted and escaped before they reach markup.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod earl;
pub mod harness;
pub mod presentation;
pub mod refresh;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::HarnessAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::sink_from_config;
pub use earl::EarlEntry;
pub use earl::EarlOutcome;
pub use earl::earl_report;
pub use harness::Harness;
pub use harness::HarnessSettings;
pub use harness::HttpReply;
pub use harness::verify_records;
pub use refresh::RefreshError;
pub use refresh::RefreshReport;
pub use refresh::run_refresh;
pub use routes::QueryParams;
pub use routes::Route;
pub use server::HarnessServer;
pub use server::ServerError;
pub use server::harness_from_config;
pub use server::server_from_config;
