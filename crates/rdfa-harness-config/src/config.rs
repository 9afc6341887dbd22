// crates/rdfa-harness-config/src/config.rs
// ============================================================================
// Module: RDFa Harness Configuration
// Description: Configuration loading and validation for the harness.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `RDFA_HARNESS_CONFIG`, then
//! `rdfa-harness.toml` in the working directory. Only the last of these may
//! be absent, in which case built-in defaults are used.
//! Security posture: config inputs are untrusted and invalid values fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "rdfa-harness.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RDFA_HARNESS_CONFIG";
/// Maximum config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum accepted request URL length.
pub(crate) const MAX_URL_BYTES: usize = 64 * 1024;
/// Maximum outbound request timeout.
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 600_000;
/// Minimum outbound request timeout.
pub(crate) const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Default test case base URL used for `$TCPATH`.
pub const DEFAULT_BASE_TEST_CASE_URL: &str = "http://rdfa.digitalbazaar.com/test-suite/test-cases/";
/// Default manifest URL.
pub const DEFAULT_MANIFEST_URL: &str = "http://rdfa.digitalbazaar.com/test-suite/manifest.rdf";
/// Default RDF/XML extractor endpoint.
pub const DEFAULT_RDFA_EXTRACTOR: &str = "http://www.w3.org/2012/pyRdfa/extract?format=xml&uri=";
/// Default N3 extractor endpoint.
pub const DEFAULT_N3_EXTRACTOR: &str = "http://www.w3.org/2012/pyRdfa/extract?format=n3&uri=";
/// Default query engine endpoint.
pub const DEFAULT_SPARQL_ENGINE: &str = "http://sparql.org/sparql?query=";
/// Default outbound user agent.
pub const DEFAULT_USER_AGENT: &str = "rdfa-harness/0.1";

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Harness configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Template corpus configuration.
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Remote service endpoints.
    #[serde(default)]
    pub services: ServicesConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl HarnessConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parses and validates configuration from raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the bytes are oversized, not UTF-8, not
    /// TOML, or fail validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.corpus.validate()?;
        self.services.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Longest request URL served; longer paths get the error document.
    #[serde(default = "default_max_url_bytes")]
    pub max_url_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_url_bytes: default_max_url_bytes(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("server.bind is not a socket address: {}", self.bind)))
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_url_bytes == 0 || self.max_url_bytes > MAX_URL_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_url_bytes must be between 1 and {MAX_URL_BYTES}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Corpus
// ============================================================================

/// Template corpus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Directory containing `test-suite/tests`.
    #[serde(default = "default_corpus_root")]
    pub root: String,
    /// URL prefix substituted for `$TCPATH`, before the family segment.
    #[serde(default = "default_base_test_case_url")]
    pub base_test_case_url: String,
    /// Enables the corpus refresh route (explicit opt-in).
    #[serde(default)]
    pub allow_refresh: bool,
    /// Program and arguments run by the refresh route.
    #[serde(default = "default_refresh_command")]
    pub refresh_command: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_corpus_root(),
            base_test_case_url: default_base_test_case_url(),
            allow_refresh: false,
            refresh_command: default_refresh_command(),
        }
    }
}

impl CorpusConfig {
    /// Returns the corpus root as a path.
    #[must_use]
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(self.root.trim())
    }

    /// Validates corpus configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("corpus.root", &self.root)?;
        validate_service_url("corpus.base_test_case_url", &self.base_test_case_url)?;
        if !self.base_test_case_url.ends_with('/') {
            return Err(ConfigError::Invalid(
                "corpus.base_test_case_url must end with '/'".to_string(),
            ));
        }
        match self.refresh_command.first() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::Invalid(
                "corpus.refresh_command must name a program".to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Services
// ============================================================================

/// Remote service endpoints.
///
/// Extractor and engine values are prefixes; the encoded argument is
/// appended directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServicesConfig {
    /// Default manifest URL.
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,
    /// Extractor endpoint producing RDF/XML.
    #[serde(default = "default_rdfa_extractor")]
    pub rdfa_extractor: String,
    /// Extractor endpoint producing N3.
    #[serde(default = "default_n3_extractor")]
    pub n3_extractor: String,
    /// Query engine endpoint.
    #[serde(default = "default_sparql_engine")]
    pub sparql_engine: String,
    /// Outbound user agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional whole-request timeout; unset keeps the transport default.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            rdfa_extractor: default_rdfa_extractor(),
            n3_extractor: default_n3_extractor(),
            sparql_engine: default_sparql_engine(),
            user_agent: default_user_agent(),
            request_timeout_ms: None,
        }
    }
}

impl ServicesConfig {
    /// Returns the configured request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Validates service configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_service_url("services.manifest_url", &self.manifest_url)?;
        validate_service_url("services.rdfa_extractor", &self.rdfa_extractor)?;
        validate_service_url("services.n3_extractor", &self.n3_extractor)?;
        validate_service_url("services.sparql_engine", &self.sparql_engine)?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("services.user_agent must be non-empty".to_string()));
        }
        if let Some(timeout_ms) = self.request_timeout_ms {
            validate_timeout_range(
                "services.request_timeout_ms",
                timeout_ms,
                MIN_REQUEST_TIMEOUT_MS,
                MAX_REQUEST_TIMEOUT_MS,
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditMode {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
    /// Audit disabled.
    None,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub mode: AuditMode,
    /// Audit log path, required for file mode.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        if self.mode == AuditMode::File && self.path.is_none() {
            return Err(ConfigError::Invalid("audit.path is required for file mode".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag is false only for the default name.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates an absolute http(s) service URL prefix.
fn validate_service_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    let url = Url::parse(trimmed)
        .map_err(|err| ConfigError::Invalid(format!("{field} is not a valid url: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid(format!("{field} has unsupported scheme {scheme}"))),
    }
}

/// Validates a timeout against a range.
fn validate_timeout_range(
    field: &str,
    value_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> Result<(), ConfigError> {
    if value_ms < min_ms || value_ms > max_ms {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {min_ms} and {max_ms} milliseconds",
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default bind address.
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default request URL limit in bytes.
const fn default_max_url_bytes() -> usize {
    8192
}

/// Default corpus root (the working directory).
fn default_corpus_root() -> String {
    ".".to_string()
}

/// Default test case base URL.
fn default_base_test_case_url() -> String {
    DEFAULT_BASE_TEST_CASE_URL.to_string()
}

/// Default refresh command.
fn default_refresh_command() -> Vec<String> {
    vec!["git".to_string(), "pull".to_string()]
}

/// Default manifest URL.
fn default_manifest_url() -> String {
    DEFAULT_MANIFEST_URL.to_string()
}

/// Default RDF/XML extractor endpoint.
fn default_rdfa_extractor() -> String {
    DEFAULT_RDFA_EXTRACTOR.to_string()
}

/// Default N3 extractor endpoint.
fn default_n3_extractor() -> String {
    DEFAULT_N3_EXTRACTOR.to_string()
}

/// Default query engine endpoint.
fn default_sparql_engine() -> String {
    DEFAULT_SPARQL_ENGINE.to_string()
}

/// Default outbound user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::AuditMode;
    use super::HarnessConfig;
    use super::validate_service_url;
    use super::validate_timeout_range;

    #[test]
    fn defaults_are_valid() {
        let config = HarnessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.corpus.refresh_command, vec!["git", "pull"]);
        assert_eq!(config.audit.mode, AuditMode::Stderr);
        assert!(!config.corpus.allow_refresh);
    }

    #[test]
    fn service_url_requires_http_scheme() {
        assert!(validate_service_url("f", "http://x/extract?uri=").is_ok());
        assert!(validate_service_url("f", "file:///etc/passwd").is_err());
        assert!(validate_service_url("f", "  ").is_err());
    }

    #[test]
    fn timeout_range_is_inclusive() {
        assert!(validate_timeout_range("t", 100, 100, 200).is_ok());
        assert!(validate_timeout_range("t", 200, 100, 200).is_ok());
        assert!(validate_timeout_range("t", 99, 100, 200).is_err());
    }
}
