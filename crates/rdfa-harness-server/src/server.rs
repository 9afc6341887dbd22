// crates/rdfa-harness-server/src/server.rs
// ============================================================================
// Module: RDFa Harness HTTP Server
// Description: Blocking HTTP loop serving harness replies.
// Purpose: Bind a listener and answer requests one at a time.
// Dependencies: tiny_http, thiserror
// ============================================================================

//! ## Overview
//! The server accepts one request, handles it to completion, and responds
//! before accepting the next. Only `GET` and `HEAD` are answered; other
//! methods receive 405.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;

use rdfa_harness_config::HarnessConfig;
use rdfa_harness_core::Fetcher;
use rdfa_harness_core::HttpFetcher;
use rdfa_harness_core::HttpFetcherSettings;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

use crate::audit::sink_from_config;
use crate::harness::Harness;
use crate::harness::HarnessSettings;
use crate::harness::HttpReply;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Harness server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds a harness backed by the HTTP fetcher described by `config`.
///
/// # Errors
///
/// Returns [`ServerError`] when the HTTP client or audit sink cannot be
/// created.
pub fn harness_from_config(config: &HarnessConfig) -> Result<Harness<HttpFetcher>, ServerError> {
    let fetcher = HttpFetcher::with_settings(&HttpFetcherSettings {
        user_agent: config.services.user_agent.clone(),
        timeout: config.services.request_timeout(),
    })
    .map_err(|err| ServerError::Init(err.to_string()))?;
    let audit = sink_from_config(&config.audit).map_err(|err| ServerError::Init(err.to_string()))?;
    Ok(Harness::new(HarnessSettings::from_config(config), fetcher, audit))
}

/// Builds the harness for `config` and binds its configured address.
///
/// # Errors
///
/// Returns [`ServerError`] when the bind address is invalid, the harness
/// cannot be built, or binding fails.
pub fn server_from_config(
    config: &HarnessConfig,
) -> Result<HarnessServer<HttpFetcher>, ServerError> {
    let addr = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
    HarnessServer::bind(addr, harness_from_config(config)?)
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Sequential HTTP server for a [`Harness`].
pub struct HarnessServer<F> {
    /// Bound listener.
    server: Server,
    /// Request handler.
    harness: Harness<F>,
}

impl<F: Fetcher> HarnessServer<F> {
    /// Binds `addr` for `harness`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the address cannot be bound.
    pub fn bind(addr: SocketAddr, harness: Harness<F>) -> Result<Self, ServerError> {
        let server = Server::http(addr)
            .map_err(|err| ServerError::Transport(format!("bind {addr} failed: {err}")))?;
        Ok(Self {
            server,
            harness,
        })
    }

    /// Returns the bound socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the listener is not an IP
    /// socket.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.server
            .server_addr()
            .to_ip()
            .ok_or_else(|| ServerError::Transport("listener has no ip address".to_string()))
    }

    /// Returns the request handler.
    #[must_use]
    pub const fn harness(&self) -> &Harness<F> {
        &self.harness
    }

    /// Serves requests until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when accepting a request fails.
    pub fn serve(&self) -> Result<(), ServerError> {
        loop {
            self.serve_one()?;
        }
    }

    /// Accepts and answers exactly one request.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when accepting or responding fails.
    pub fn serve_one(&self) -> Result<(), ServerError> {
        let request =
            self.server.recv().map_err(|err| ServerError::Transport(err.to_string()))?;
        self.respond(request)
    }

    /// Handles and answers one accepted request.
    fn respond(&self, request: Request) -> Result<(), ServerError> {
        let reply = match request.method() {
            Method::Get | Method::Head => self.harness.handle(request.url()),
            _ => HttpReply {
                status: 405,
                content_type: "text/plain; charset=utf-8",
                body: "method not allowed\n".to_string(),
            },
        };
        let mut response =
            Response::from_data(reply.body.into_bytes()).with_status_code(reply.status);
        if let Ok(header) = Header::from_bytes("Content-Type", reply.content_type) {
            response = response.with_header(header);
        }
        request.respond(response).map_err(|err| ServerError::Transport(err.to_string()))
    }
}
