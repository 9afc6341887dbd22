// crates/rdfa-harness-core/src/runtime/mod.rs
// ============================================================================
// Module: RDFa Harness Runtime
// Description: Remote round trips performed per request.
// Purpose: Group the verification oracle and details retrieval.
// Dependencies: rdfa-harness-core
// ============================================================================

//! ## Overview
//! Request-time operations that talk to the extractor and query engine.

pub mod details;
pub mod oracle;

pub use details::DetailsError;
pub use details::DetailsRequest;
pub use details::fetch_details;
pub use oracle::OracleError;
pub use oracle::VerificationOracle;
pub use oracle::VerificationRequest;
pub use oracle::evaluation_url;
pub use oracle::extraction_url;
pub use oracle::rewrite_query;
