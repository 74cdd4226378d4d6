// crates/replication-locator-config/src/config.rs
// ============================================================================
// Module: Replication Locator Configuration
// Description: Configuration loading and validation for the locator.
// Purpose: Provide strict config parsing with hard limits and defaults.
// Dependencies: replication-locator-core, replication-locator-http, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then [`CONFIG_ENV_VAR`], then
//! [`DEFAULT_CONFIG_NAME`] in the working directory. Only the default file may
//! be absent, in which case built-in defaults apply; an explicitly named file
//! that cannot be read is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use replication_locator_core::LocatorSettings;
use replication_locator_core::Period;
use replication_locator_core::ProbeSettings;
use replication_locator_core::resolve_base_url;
use replication_locator_http::HttpTransportConfig;
use replication_locator_http::transport::DEFAULT_MAX_REDIRECTS;
use replication_locator_http::transport::DEFAULT_MAX_RESPONSE_BYTES;
use replication_locator_http::transport::DEFAULT_TIMEOUT_MS;
use replication_locator_http::transport::DEFAULT_USER_AGENT;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "replication-locator.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "REPLICATION_LOCATOR_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum timeout accepted for any request, in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 600_000;
/// Maximum redirect limit.
pub(crate) const MAX_REDIRECTS: usize = 20;
/// Maximum response size limit in bytes.
pub(crate) const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Maximum user agent length.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 256;
/// Maximum retries for a single probe.
pub(crate) const MAX_PROBE_RETRIES: u32 = 10;
/// Default OSM replication root.
pub(crate) const DEFAULT_BASE_URL: &str = "https://planet.openstreetmap.org/replication/";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Replication locator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorConfig {
    /// HTTP transport limits.
    #[serde(default)]
    pub http: HttpConfig,
    /// Accessibility probe budgets.
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Default lookup inputs, overridden by command-line flags.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl LocatorConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        Self::load_source(&source)
    }

    /// Loads configuration from a resolved source.
    fn load_source(source: &ConfigSource) -> Result<Self, ConfigError> {
        let resolved = source.path();
        validate_path(resolved)?;
        let bytes = match fs::read(resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && source.is_default() => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Io(format!("{}: {err}", resolved.display())));
            }
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
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
        self.http.validate()?;
        self.probe.validate()?;
        self.defaults.validate()?;
        Ok(())
    }

    /// Returns the HTTP transport settings.
    #[must_use]
    pub fn http_transport_config(&self) -> HttpTransportConfig {
        HttpTransportConfig {
            timeout_ms: self.http.timeout_ms,
            max_redirects: self.http.max_redirects,
            max_response_bytes: self.http.max_response_bytes,
            user_agent: self.http.user_agent.clone(),
        }
    }

    /// Returns the locator probe settings.
    #[must_use]
    pub fn locator_settings(&self) -> LocatorSettings {
        LocatorSettings {
            base_probe: self.probe.base.settings(ProbeSettings::base_directory()),
            result_probe: self.probe.result.settings(ProbeSettings::result()),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Per-fetch timeout for descriptor reads, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum descriptor body size, in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            max_response_bytes: default_max_response_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Validates HTTP limits.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_timeout("http.timeout_ms", self.timeout_ms)?;
        if self.max_redirects > MAX_REDIRECTS {
            return Err(ConfigError::Invalid("http.max_redirects out of range".to_string()));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid("http.max_response_bytes out of range".to_string()));
        }
        let agent = self.user_agent.trim();
        if agent.is_empty() || agent.len() > MAX_USER_AGENT_LENGTH {
            return Err(ConfigError::Invalid("http.user_agent length out of range".to_string()));
        }
        if !agent.chars().all(|ch| ch.is_ascii() && !ch.is_ascii_control()) {
            return Err(ConfigError::Invalid(
                "http.user_agent must be printable ascii".to_string(),
            ));
        }
        Ok(())
    }
}

/// Accessibility probe configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Probe of the descriptor directory before any reads.
    #[serde(default)]
    pub base: ProbeTargetConfig,
    /// Probe of the selected descriptor before it is returned.
    #[serde(default)]
    pub result: ProbeTargetConfig,
}

impl ProbeConfig {
    /// Validates both probe budgets.
    fn validate(&self) -> Result<(), ConfigError> {
        self.base.validate("probe.base")?;
        self.result.validate("probe.result")
    }
}

/// Budget of one probe; omitted values use the probe's built-in default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeTargetConfig {
    /// Per-attempt timeout, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Additional attempts after the first failure.
    #[serde(default)]
    pub retries: Option<u32>,
}

impl ProbeTargetConfig {
    /// Merges the configured values over `fallback`.
    #[must_use]
    pub fn settings(&self, fallback: ProbeSettings) -> ProbeSettings {
        ProbeSettings {
            timeout: self.timeout_ms.map_or(fallback.timeout, Duration::from_millis),
            retries: self.retries.unwrap_or(fallback.retries),
        }
    }

    /// Validates the probe budget.
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if let Some(timeout_ms) = self.timeout_ms {
            validate_timeout(&format!("{section}.timeout_ms"), timeout_ms)?;
        }
        if let Some(retries) = self.retries
            && retries > MAX_PROBE_RETRIES
        {
            return Err(ConfigError::Invalid(format!("{section}.retries out of range")));
        }
        Ok(())
    }
}

/// Default lookup inputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Replication URL used when none is given on the command line.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Replication period used when none is given on the command line.
    #[serde(default = "default_period")]
    pub period: Period,
    /// Whether the period is a path segment beneath the base URL.
    #[serde(default = "default_osm_like")]
    pub osm_like: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            period: default_period(),
            osm_like: default_osm_like(),
        }
    }
}

impl DefaultsConfig {
    /// Validates that the default URL resolves to a descriptor directory.
    fn validate(&self) -> Result<(), ConfigError> {
        resolve_base_url(&self.base_url, self.period, self.osm_like)
            .map_err(|err| ConfigError::Invalid(format!("defaults.base_url: {err}")))?;
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

/// Where the config path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Path supplied by the caller or the environment; must exist.
    Explicit(PathBuf),
    /// Built-in default file name; may be absent.
    Default(PathBuf),
}

impl ConfigSource {
    /// Returns the path to read.
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }

    /// Returns true when the path is the built-in default.
    const fn is_default(&self) -> bool {
        matches!(self, Self::Default(_))
    }
}

/// Resolves the config path from the caller, the environment, or the default.
fn resolve_path(path: Option<&Path>, env_path: Option<String>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = path {
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }
    if let Some(env_path) = env_path.filter(|value| !value.trim().is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ConfigSource::Explicit(PathBuf::from(env_path)));
    }
    Ok(ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Validates the resolved path against length limits.
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

/// Validates a timeout in milliseconds.
fn validate_timeout(field: &str, timeout_ms: u64) -> Result<(), ConfigError> {
    if timeout_ms == 0 || timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Invalid(format!("{field} out of range")));
    }
    Ok(())
}

/// Default per-fetch timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default redirect limit.
const fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

/// Default body size cap.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default replication URL.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default replication period.
const fn default_period() -> Period {
    Period::Minute
}

/// Default layout flag.
const fn default_osm_like() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================
