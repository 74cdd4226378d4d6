// crates/replication-locator-config/src/lib.rs
// ============================================================================
// Module: Replication Locator Config Library
// Description: Configuration model and loader for the replication locator.
// Purpose: Provide strict, limit-checked TOML configuration with defaults.
// Dependencies: replication-locator-core, replication-locator-http, serde, toml
// ============================================================================

//! ## Overview
//! [`LocatorConfig`] describes HTTP limits, probe budgets, and the default
//! lookup inputs. Every section is optional; omitted values fall back to the
//! built-in defaults and the result is validated before use.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::DefaultsConfig;
pub use config::HttpConfig;
pub use config::LocatorConfig;
pub use config::ProbeConfig;
pub use config::ProbeTargetConfig;
