// crates/rdfa-harness-core/src/interfaces/mod.rs
// ============================================================================
// Module: RDFa Harness Interfaces
// Description: Backend-agnostic interface for remote resource retrieval.
// Purpose: Keep the loader and oracle independent of the HTTP transport.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The manifest loader, verification oracle, and details view all talk to
//! remote services through [`Fetcher`]. The production implementation is
//! [`crate::fetch::HttpFetcher`]; tests can substitute canned responses.
//! Implementations must not retry and must surface every failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Fetched Resource
// ============================================================================

/// Bytes retrieved from a remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResource {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Optional content type hint.
    pub content_type: Option<String>,
}

impl FetchedResource {
    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

// ============================================================================
// SECTION: Fetch Errors
// ============================================================================

/// Errors emitted by fetchers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL failed to parse.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Unsupported URL scheme.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    /// Transport-level failure (connect, read, TLS).
    #[error("http failure: {0}")]
    Http(String),
    /// Remote answered with a non-success status.
    #[error("http status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

// ============================================================================
// SECTION: Fetcher Trait
// ============================================================================

/// Retrieves remote resources by URL.
pub trait Fetcher: Send + Sync {
    /// Fetches the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the resource cannot be retrieved.
    fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError>;

    /// Fetches the resource at `url` as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the resource cannot be retrieved.
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.fetch(url).map(|resource| resource.text_lossy())
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        (**self).fetch(url)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        (**self).fetch(url)
    }
}
