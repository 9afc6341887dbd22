// crates/rdfa-harness-core/src/fetch/mod.rs
// ============================================================================
// Module: RDFa Harness Fetchers
// Description: Reference fetcher implementations.
// Purpose: Provide the production HTTP transport for remote services.
// Dependencies: reqwest
// ============================================================================

//! ## Overview
//! Fetcher implementations. See [`crate::interfaces::Fetcher`].

pub mod http;

pub use http::DEFAULT_USER_AGENT;
pub use http::HttpFetcher;
pub use http::HttpFetcherSettings;
