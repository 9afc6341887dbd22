// crates/rdfa-harness-core/src/lib.rs
// ============================================================================
// Module: RDFa Harness Core
// Description: Test case resolution and verification pipeline.
// Purpose: Load manifests, verify test cases, and render test documents.
// Dependencies: oxrdfio, regex, reqwest, serde, thiserror, url
// ============================================================================

//! ## Overview
//! This crate holds the harness pipeline: the manifest loader turns an RDF
//! test manifest into ordered [`TestRecord`]s, the verification oracle
//! drives the extractor and query-engine round trip for one record, and the
//! test document resolver renders per-family documents from the on-disk
//! corpus.
//! Invariants:
//! - All values are request-scoped; nothing is cached between calls.
//! - Remote failures surface as typed errors and are never retried.
//!
//! Security posture: manifests, query documents, engine responses, and
//! request paths are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod encoding;
pub mod fetch;
pub mod interfaces;
pub mod manifest;
pub mod resolver;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::Classification;
pub use crate::core::DocumentFormat;
pub use crate::core::ExpectedResult;
pub use crate::core::HostLanguage;
pub use crate::core::TestDetails;
pub use crate::core::TestNumber;
pub use crate::core::TestRecord;
pub use crate::core::VerificationOutcome;
pub use crate::encoding::quote;
pub use crate::encoding::unquote;
pub use crate::fetch::HttpFetcher;
pub use crate::fetch::HttpFetcherSettings;
pub use crate::interfaces::FetchError;
pub use crate::interfaces::FetchedResource;
pub use crate::interfaces::Fetcher;
pub use crate::manifest::ManifestError;
pub use crate::manifest::ManifestLoader;
pub use crate::resolver::ResolveError;
pub use crate::resolver::ResolvedDocument;
pub use crate::resolver::TestDocumentResolver;
pub use crate::runtime::DetailsError;
pub use crate::runtime::DetailsRequest;
pub use crate::runtime::OracleError;
pub use crate::runtime::VerificationOracle;
pub use crate::runtime::VerificationRequest;
pub use crate::runtime::fetch_details;
