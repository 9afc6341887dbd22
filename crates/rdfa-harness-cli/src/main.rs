// crates/rdfa-harness-cli/src/main.rs
// ============================================================================
// Module: RDFa Harness CLI Entry Point
// Description: Command dispatcher for the harness server and batch runs.
// Purpose: Serve the harness, verify tests from a terminal, render documents.
// Dependencies: clap, rdfa-harness-core, rdfa-harness-server, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The CLI wraps the harness pipeline for terminal use: `serve` runs the
//! HTTP surface, `list`, `check`, and `run` drive the manifest loader and
//! verification oracle directly, and `render` prints one corpus document.
//! Every command reads the same configuration file as the server.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use rdfa_harness_config::HarnessConfig;
use rdfa_harness_core::ExpectedResult;
use rdfa_harness_core::HttpFetcher;
use rdfa_harness_core::HttpFetcherSettings;
use rdfa_harness_core::ManifestLoader;
use rdfa_harness_core::OracleError;
use rdfa_harness_core::TestDocumentResolver;
use rdfa_harness_core::TestRecord;
use rdfa_harness_core::VerificationOracle;
use rdfa_harness_core::VerificationOutcome;
use rdfa_harness_core::VerificationRequest;
use rdfa_harness_server::EarlEntry;
use rdfa_harness_server::EarlOutcome;
use rdfa_harness_server::earl_report;
use rdfa_harness_server::server_from_config;
use rdfa_harness_server::verify_records;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "rdfa-harness", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the harness HTTP server.
    Serve(ServeCommand),
    /// List the tests of a manifest.
    List(ListCommand),
    /// Verify one test case.
    Check(CheckCommand),
    /// Verify every matching test of a manifest.
    Run(RunCommand),
    /// Print one rendered test document.
    Render(RenderCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to rdfa-harness.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Bind address overriding `server.bind`.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Output format for `list`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ListFormat {
    /// One line per test.
    #[default]
    Text,
    /// JSON array of records.
    Json,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Manifest URL (defaults to `services.manifest_url`).
    #[arg(long, value_name = "URL")]
    manifest: Option<String>,
    /// Review status to select.
    #[arg(long, default_value = "approved")]
    status: String,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,
}

/// Expected answer argument.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ExpectedArg {
    /// The query must answer true.
    #[default]
    True,
    /// The query must answer false.
    False,
}

impl From<ExpectedArg> for ExpectedResult {
    fn from(value: ExpectedArg) -> Self {
        match value {
            ExpectedArg::True => Self::True,
            ExpectedArg::False => Self::False,
        }
    }
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Markup document URI.
    #[arg(long, value_name = "URL")]
    source: String,
    /// Query document URI.
    #[arg(long, value_name = "URL")]
    query: String,
    /// Expected answer.
    #[arg(long, value_enum, default_value_t = ExpectedArg::True)]
    expected: ExpectedArg,
    /// Extractor endpoint (defaults to `services.rdfa_extractor`).
    #[arg(long, value_name = "URL")]
    extractor: Option<String>,
    /// Query engine endpoint (defaults to `services.sparql_engine`).
    #[arg(long, value_name = "URL")]
    engine: Option<String>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Manifest URL (defaults to `services.manifest_url`).
    #[arg(long, value_name = "URL")]
    manifest: Option<String>,
    /// Review status to select.
    #[arg(long, default_value = "approved")]
    status: String,
    /// Extractor endpoint (defaults to `services.rdfa_extractor`).
    #[arg(long, value_name = "URL")]
    extractor: Option<String>,
    /// Query engine endpoint (defaults to `services.sparql_engine`).
    #[arg(long, value_name = "URL")]
    engine: Option<String>,
    /// Write an EARL report to this path.
    #[arg(long, value_name = "PATH")]
    earl: Option<PathBuf>,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
struct RenderCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Syntax family (`xhtml1`, `html4`, `html5`, `svg`).
    family: String,
    /// Document filename, such as `0001.html`.
    filename: String,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a harness configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command),
        Commands::List(command) => command_list(command),
        Commands::Check(command) => command_check(command),
        Commands::Run(command) => command_run(command),
        Commands::Render(command) => command_render(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `serve` command.
fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.as_deref())?;
    if let Some(bind) = command.bind {
        config.server.bind = bind;
    }
    let server = server_from_config(&config)
        .map_err(|err| CliError::new(format!("failed to start server: {err}")))?;
    let addr = server.local_addr().map_err(|err| CliError::new(err.to_string()))?;
    write_stderr_line(&format!("rdfa-harness listening on http://{addr}/test-suite/"))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `list` command.
fn command_list(command: ListCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let manifest = command.manifest.unwrap_or_else(|| config.services.manifest_url.clone());
    let fetcher = fetcher_from_config(&config)?;
    let records = ManifestLoader::new(&fetcher)
        .load_test_cases(&manifest, &command.status)
        .map_err(|err| CliError::new(err.to_string()))?;
    match command.format {
        ListFormat::Text => {
            let mut output = String::new();
            for record in &records {
                output.push_str(&list_line(record));
                output.push('\n');
            }
            write_stdout_bytes(output.as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ListFormat::Json => {
            let mut bytes = serde_json::to_vec_pretty(&records)
                .map_err(|err| CliError::new(format!("failed to serialize records: {err}")))?;
            bytes.push(b'\n');
            write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `check` command.
fn command_check(command: CheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let fetcher = fetcher_from_config(&config)?;
    let extractor = command.extractor.unwrap_or_else(|| config.services.rdfa_extractor.clone());
    let engine = command.engine.unwrap_or_else(|| config.services.sparql_engine.clone());
    let request = VerificationRequest {
        number: None,
        extractor_endpoint: &extractor,
        query_endpoint: &engine,
        source_uri: &command.source,
        query_uri: &command.query,
        expected: command.expected.into(),
    };
    let outcome = VerificationOracle::new(&fetcher)
        .verify(&request)
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&check_line(&command.source, &outcome))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(if outcome.passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes the `run` command.
fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let fetcher = fetcher_from_config(&config)?;
    let manifest = command.manifest.unwrap_or_else(|| config.services.manifest_url.clone());
    let extractor = command.extractor.unwrap_or_else(|| config.services.rdfa_extractor.clone());
    let engine = command.engine.unwrap_or_else(|| config.services.sparql_engine.clone());
    let records = ManifestLoader::new(&fetcher)
        .load_test_cases(&manifest, &command.status)
        .map_err(|err| CliError::new(err.to_string()))?;

    let mut write_failure = None;
    let entries = verify_records(&fetcher, &records, &extractor, &engine, |record, result| {
        if write_failure.is_none()
            && let Err(err) = write_stdout_line(&run_line(record, result))
        {
            write_failure = Some(err);
        }
    });
    if let Some(err) = write_failure {
        return Err(CliError::new(output_error("stdout", &err)));
    }

    let summary = RunSummary::from_entries(&entries);
    write_stdout_line(&summary.to_string())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if let Some(path) = command.earl {
        fs::write(&path, earl_report(&extractor, &entries)).map_err(|err| {
            CliError::new(format!("failed to write {}: {err}", path.display()))
        })?;
    }
    Ok(if summary.all_passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Executes the `render` command.
fn command_render(command: &RenderCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let resolver = TestDocumentResolver::new(
        config.corpus.root_path(),
        config.corpus.base_test_case_url.clone(),
    );
    let document = resolver
        .resolve(&[command.family.as_str(), command.filename.as_str()])
        .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_bytes(document.body.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            load_config(command.config.as_deref())?;
            write_stdout_line("config valid")
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<HarnessConfig> {
    HarnessConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

/// Builds the outbound fetcher described by configuration.
fn fetcher_from_config(config: &HarnessConfig) -> CliResult<HttpFetcher> {
    HttpFetcher::with_settings(&HttpFetcherSettings {
        user_agent: config.services.user_agent.clone(),
        timeout: config.services.request_timeout(),
    })
    .map_err(|err| CliError::new(err.to_string()))
}

/// Text line for one listed record.
fn list_line(record: &TestRecord) -> String {
    format!(
        "{:>4}  {:<10} {:<5}  {}  {}",
        record.number,
        record.classification.as_str(),
        record.expected.as_str(),
        record.title,
        record.source_uri
    )
}

/// Text line for one `check` outcome.
fn check_line(source: &str, outcome: &VerificationOutcome) -> String {
    let observed = outcome.observed.map_or("none", |value| if value { "true" } else { "false" });
    format!(
        "{} {source} (expected {}, observed {observed})",
        outcome.status_label(),
        outcome.expected.as_str()
    )
}

/// Text line for one record of a `run`.
fn run_line(record: &TestRecord, result: &Result<VerificationOutcome, OracleError>) -> String {
    match result {
        Ok(outcome) => format!("{} #{} {}", outcome.status_label(), record.number, record.title),
        Err(err) => format!("ERROR #{} {}: {err}", record.number, record.title),
    }
}

/// Outcome counts for a `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunSummary {
    /// Passed tests.
    passed: usize,
    /// Failed tests.
    failed: usize,
    /// Tests that could not be posed.
    not_tested: usize,
}

impl RunSummary {
    /// Counts outcomes.
    fn from_entries(entries: &[EarlEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut summary, entry| {
            match entry.outcome {
                EarlOutcome::Pass => summary.passed += 1,
                EarlOutcome::Fail => summary.failed += 1,
                EarlOutcome::NotTested => summary.not_tested += 1,
            }
            summary
        })
    }

    /// True when every test passed.
    const fn all_passed(self) -> bool {
        self.failed == 0 && self.not_tested == 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} not tested",
            self.passed, self.failed, self.not_tested
        )
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
