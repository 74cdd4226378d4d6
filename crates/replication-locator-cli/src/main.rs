// crates/replication-locator-cli/src/main.rs
// ============================================================================
// Module: Replication Locator CLI Entry Point
// Description: Command-line front end for the replication sequence locator.
// Purpose: Wire config, HTTP transport, and diagnostics into one lookup.
// Dependencies: clap, replication-locator-{core,http,config}, thiserror.
// ============================================================================

//! ## Overview
//! `replication-locator` prints the descriptor URL of the newest replication
//! sequence at or before `--timestamp`. The result URL is the only thing ever
//! written to stdout; diagnostics, warnings, and errors go to stderr.
//! Command-line flags override the `[defaults]` section of the config file.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use replication_locator_config::DefaultsConfig;
use replication_locator_config::LocatorConfig;
use replication_locator_core::JsonLinesReporter;
use replication_locator_core::LocateError;
use replication_locator_core::LocateRequest;
use replication_locator_core::Located;
use replication_locator_core::Locator;
use replication_locator_core::NoopReporter;
use replication_locator_core::Outcome;
use replication_locator_core::Period;
use replication_locator_core::Reporter;
use replication_locator_core::TextReporter;
use replication_locator_http::HttpTransport;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "replication-locator", disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Replication period: minute, hour, or day (overrides `defaults.period`).
    #[arg(long, value_name = "PERIOD", value_parser = parse_period)]
    period: Option<Period>,
    /// Target UTC timestamp (`YYYY-MM-DD[THH[:MM[:SS]]][Z]`).
    #[arg(long, value_name = "TIMESTAMP", required_unless_present = "show_version")]
    timestamp: Option<String>,
    /// Replication URL (overrides `defaults.base_url`).
    #[arg(long, value_name = "URL")]
    url: Option<String>,
    /// Append the period directory to the URL (overrides `defaults.osm_like`).
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "no_osm_layout")]
    osm_layout: bool,
    /// Treat the URL as the descriptor directory itself.
    #[arg(long, action = ArgAction::SetTrue)]
    no_osm_layout: bool,
    /// Config file path (defaults to `replication-locator.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Diagnostics format written to stderr.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = DiagnosticsArg::Text)]
    diagnostics: DiagnosticsArg,
}

/// Diagnostics output format.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum DiagnosticsArg {
    /// Human-readable `[locate]` lines.
    Text,
    /// One JSON object per line.
    Json,
    /// No diagnostics.
    Off,
}

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
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

/// Parses arguments and executes one lookup.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("replication-locator {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = LocatorConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let request = build_request(&cli, &config.defaults)?;
    let transport = HttpTransport::new(config.http_transport_config())
        .map_err(|err| CliError::new(format!("http client setup failed: {err}")))?;
    let reporter = build_reporter(cli.diagnostics);

    let located = Locator::new(&transport, reporter.as_ref())
        .with_settings(config.locator_settings())
        .locate(&request)
        .map_err(|err| CliError::new(err.to_string()))?;

    if let Some(warning) = outcome_warning(&located) {
        write_stderr_line(&warning).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    write_stdout_line(&located.url).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Request Assembly
// ============================================================================

/// Merges command-line flags over the configured defaults.
fn build_request(cli: &Cli, defaults: &DefaultsConfig) -> CliResult<LocateRequest> {
    let Some(timestamp) = cli.timestamp.clone() else {
        return Err(CliError::new("missing required --timestamp".to_string()));
    };
    Ok(LocateRequest {
        period: cli.period.unwrap_or(defaults.period),
        timestamp,
        base_url: cli.url.clone().unwrap_or_else(|| defaults.base_url.clone()),
        osm_like: resolve_osm_layout(cli, defaults.osm_like),
    })
}

/// Parses a period name case-insensitively.
fn parse_period(raw: &str) -> Result<Period, LocateError> {
    raw.parse()
}

/// Applies the layout flags; without either flag the configured layout wins.
const fn resolve_osm_layout(cli: &Cli, configured: bool) -> bool {
    if cli.osm_layout {
        true
    } else if cli.no_osm_layout {
        false
    } else {
        configured
    }
}

/// Selects the diagnostics sink; every sink writes to stderr.
fn build_reporter(format: DiagnosticsArg) -> Box<dyn Reporter> {
    match format {
        DiagnosticsArg::Text => Box::new(TextReporter::new(std::io::stderr())),
        DiagnosticsArg::Json => Box::new(JsonLinesReporter::new(std::io::stderr())),
        DiagnosticsArg::Off => Box::new(NoopReporter),
    }
}

/// Returns the stderr warning for approximate results.
fn outcome_warning(located: &Located) -> Option<String> {
    match located.outcome {
        Outcome::Exact => None,
        Outcome::FutureApproximation => Some(format!(
            "warning: timestamp is newer than the latest published state; returning latest \
             sequence {}",
            located.sequence
        )),
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

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
