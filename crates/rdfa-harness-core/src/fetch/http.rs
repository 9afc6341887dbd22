// crates/rdfa-harness-core/src/fetch/http.rs
// ============================================================================
// Module: RDFa Harness HTTP Fetcher
// Description: Blocking HTTP fetcher for manifests, queries, and extractions.
// Purpose: Fetch remote resources via HTTP GET.
// Dependencies: reqwest, url
// ============================================================================

//! ## Overview
//! [`HttpFetcher`] resolves `http://` and `https://` URLs with a blocking
//! client. Non-success status codes fail closed. There are no retries and
//! no timeout beyond the transport default unless one is configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::interfaces::FetchError;
use crate::interfaces::FetchedResource;
use crate::interfaces::Fetcher;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default user agent for outbound requests.
pub const DEFAULT_USER_AGENT: &str = "rdfa-harness/0.1";

/// Accept header sent with every request.
const ACCEPT_HEADER: &str =
    "application/rdf+xml, text/turtle;q=0.9, application/sparql-results+xml;q=0.9, text/plain;q=0.4, */*;q=0.1";

// ============================================================================
// SECTION: HTTP Fetcher
// ============================================================================

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFetcherSettings {
    /// User agent string.
    pub user_agent: String,
    /// Optional whole-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for HttpFetcherSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// HTTP-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// HTTP client used for fetch requests.
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_settings(&HttpFetcherSettings::default())
    }

    /// Builds a fetcher with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the HTTP client cannot be constructed.
    pub fn with_settings(settings: &HttpFetcherSettings) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Creates a fetcher with a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedResource, FetchError> {
        let parsed = Url::parse(url).map_err(|err| FetchError::InvalidUrl(err.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(FetchError::UnsupportedScheme(scheme.to_string())),
        }
        let mut response = self
            .client
            .get(parsed.as_str())
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let mut bytes = Vec::new();
        response.read_to_end(&mut bytes).map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(FetchedResource {
            bytes,
            content_type,
        })
    }
}
