// crates/replication-locator-core/src/runtime/probe.rs
// ============================================================================
// Module: Accessibility Prober
// Description: Bounded-retry existence checks for remote URLs.
// Purpose: Fail fast on unreachable directories and sanity-check results.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! A probe issues up to `retries + 1` body-less requests and succeeds on the
//! first successful response. Attempts run back to back; each one carries the
//! configured timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::core::error::LocateError;
use crate::interfaces::LocateEvent;
use crate::interfaces::ProbeTarget;
use crate::interfaces::Reporter;
use crate::interfaces::Transport;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Timeout and retry budget for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Timeout applied to each attempt.
    pub timeout: Duration,
    /// Additional attempts after the first failure.
    pub retries: u32,
}

impl ProbeSettings {
    /// Default settings for the descriptor directory probe.
    #[must_use]
    pub const fn base_directory() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            retries: 3,
        }
    }

    /// Default settings for the selected descriptor probe.
    #[must_use]
    pub const fn result() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 2,
        }
    }

    /// Returns the total number of attempts.
    #[must_use]
    pub const fn attempts(self) -> u32 {
        self.retries.saturating_add(1)
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self::result()
    }
}

// ============================================================================
// SECTION: Probe
// ============================================================================

/// Checks that `url` is reachable within the configured attempt budget.
///
/// # Errors
///
/// Returns [`LocateError::Unreachable`] when every attempt fails.
pub fn probe_accessible(
    transport: &dyn Transport,
    reporter: &dyn Reporter,
    target: ProbeTarget,
    url: &str,
    settings: ProbeSettings,
) -> Result<(), LocateError> {
    let max_attempts = settings.attempts();
    for attempt in 1..=max_attempts {
        let result = transport.head(url, settings.timeout);
        reporter.report(&LocateEvent::ProbeAttempt {
            target,
            url: url.to_string(),
            attempt,
            max_attempts,
            error: result.as_ref().err().map(ToString::to_string),
        });
        if result.is_ok() {
            return Ok(());
        }
    }
    Err(LocateError::Unreachable {
        url: url.to_string(),
        attempts: max_attempts,
    })
}
