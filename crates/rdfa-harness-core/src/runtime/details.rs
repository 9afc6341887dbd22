// crates/rdfa-harness-core/src/runtime/details.rs
// ============================================================================
// Module: RDFa Harness Test Details
// Description: Diagnostic retrieval for a single test case.
// Purpose: Gather source, extraction output, and query text for display.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Fetches, in order: the query document, the source document, the N3
//! extraction, and the RDF/XML extraction. The first failure aborts.

use thiserror::Error;

use crate::core::TestDetails;
use crate::interfaces::FetchError;
use crate::interfaces::Fetcher;
use crate::runtime::oracle::extraction_url;

/// Details retrieval errors.
#[derive(Debug, Error)]
pub enum DetailsError {
    /// Query document fetch failed.
    #[error("query document fetch failed: {0}")]
    Query(FetchError),
    /// Source document fetch failed.
    #[error("source document fetch failed: {0}")]
    Source(FetchError),
    /// Extractor fetch failed.
    #[error("extraction fetch failed for {url}: {source}")]
    Extraction {
        /// Extractor URL.
        url: String,
        /// Underlying failure.
        source: FetchError,
    },
}

/// Inputs for a details lookup.
#[derive(Debug, Clone, Copy)]
pub struct DetailsRequest<'a> {
    /// Caller-supplied test identifier.
    pub id: &'a str,
    /// Extractor endpoint producing RDF/XML.
    pub rdf_extractor: &'a str,
    /// Extractor endpoint producing N3.
    pub n3_extractor: &'a str,
    /// Markup document URI.
    pub source_uri: &'a str,
    /// Query document URI.
    pub query_uri: &'a str,
}

/// Fetches the diagnostic material for one test.
///
/// # Errors
///
/// Returns [`DetailsError`] on the first failed fetch.
pub fn fetch_details<F: Fetcher>(
    fetcher: &F,
    request: &DetailsRequest<'_>,
) -> Result<TestDetails, DetailsError> {
    let query_text = fetcher.fetch_text(request.query_uri).map_err(DetailsError::Query)?;
    let source_text = fetcher.fetch_text(request.source_uri).map_err(DetailsError::Source)?;
    let n3_url = extraction_url(request.n3_extractor, request.source_uri);
    let n3_text = fetcher.fetch_text(&n3_url).map_err(|source| DetailsError::Extraction {
        url: n3_url.clone(),
        source,
    })?;
    let rdf_url = extraction_url(request.rdf_extractor, request.source_uri);
    let rdf_text = fetcher.fetch_text(&rdf_url).map_err(|source| DetailsError::Extraction {
        url: rdf_url.clone(),
        source,
    })?;
    Ok(TestDetails {
        id: request.id.to_string(),
        source_uri: request.source_uri.to_string(),
        query_uri: request.query_uri.to_string(),
        extraction_url: rdf_url,
        n3_extraction_url: n3_url,
        source_text,
        n3_text,
        rdf_text,
        query_text,
    })
}
