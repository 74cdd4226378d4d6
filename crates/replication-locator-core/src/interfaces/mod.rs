// crates/replication-locator-core/src/interfaces/mod.rs
// ============================================================================
// Module: Replication Locator Interfaces
// Description: Transport and reporting seams used by the locate runtime.
// Purpose: Keep network I/O and diagnostics out of the core algorithm.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The runtime reaches remote descriptors only through [`Transport`] and emits
//! diagnostics only through [`Reporter`]. Both are passed in explicitly, so the
//! core holds no process-wide state and tests can substitute in-memory fakes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::core::sequence::SequenceNumber;

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Errors emitted by transports.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// URL scheme is not supported by the transport.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    /// URL failed to parse.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Request failed before a status was received (connect, timeout, redirects).
    #[error("http failure: {0}")]
    Http(String),
    /// Server answered with a non-success status.
    #[error("http status {0}")]
    Status(u16),
    /// Response body exceeded the configured byte limit.
    #[error("response exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Observed size in bytes.
        actual_bytes: usize,
    },
    /// Response body could not be decoded as text.
    #[error("response decode failure: {0}")]
    Decode(String),
}

/// Remote read seam for descriptor resources.
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns its body as text.
    ///
    /// Implementations apply their own per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the resource cannot be read.
    fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// Checks that `url` exists without transferring its body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the probe fails or times out.
    fn head(&self, url: &str, timeout: Duration) -> Result<(), TransportError>;
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// How the returned descriptor relates to the requested instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Newest descriptor at or before the target instant.
    Exact,
    /// Target lies after the latest descriptor; the latest one is returned.
    FutureApproximation,
}

impl Outcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FutureApproximation => "future_approximation",
        }
    }
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Which URL an accessibility probe is checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeTarget {
    /// The resolved descriptor directory, before any sequence work.
    BaseDirectory,
    /// The selected descriptor, before it is returned.
    Result,
}

impl ProbeTarget {
    /// Returns a stable label for the probe target.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseDirectory => "base_directory",
            Self::Result => "result",
        }
    }
}

/// Classification of one bisection midpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MidpointOutcome {
    /// Descriptor timestamp is at or before the target; becomes the best candidate.
    AtOrBefore {
        /// Descriptor epoch seconds.
        epoch: i64,
    },
    /// Descriptor timestamp is after the target.
    After {
        /// Descriptor epoch seconds.
        epoch: i64,
    },
    /// Descriptor could not be read (missing file, transport failure, bad number).
    Unavailable {
        /// Failure description.
        reason: String,
    },
    /// Descriptor was read but its timestamp is missing or unparsable.
    Malformed {
        /// Failure description.
        reason: String,
    },
}

/// Diagnostic events emitted during a lookup.
///
/// # Invariants
/// - Events are informational; reporters must not influence the search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LocateEvent {
    /// Input URL was normalized into a descriptor directory.
    BaseResolved {
        /// URL as supplied by the caller.
        input: String,
        /// Resolved descriptor directory.
        base_url: String,
    },
    /// One accessibility probe attempt finished.
    ProbeAttempt {
        /// Probe purpose.
        target: ProbeTarget,
        /// Probed URL.
        url: String,
        /// One-based attempt number.
        attempt: u32,
        /// Total attempts allowed.
        max_attempts: u32,
        /// Failure description, `None` on success.
        error: Option<String>,
    },
    /// Latest `state.txt` was read.
    LatestState {
        /// Latest published sequence.
        sequence: SequenceNumber,
        /// Latest descriptor epoch seconds.
        epoch: i64,
        /// Target epoch seconds.
        target_epoch: i64,
    },
    /// Target lies after the latest descriptor; bisection is skipped.
    FutureTarget {
        /// Target epoch seconds.
        target_epoch: i64,
        /// Latest descriptor epoch seconds.
        latest_epoch: i64,
    },
    /// Initial search window estimated from the period rate.
    WindowEstimated {
        /// Inclusive lower bound.
        low: i64,
        /// Inclusive upper bound.
        high: i64,
    },
    /// Estimated lower bound was negative and clamped to zero.
    WindowClamped {
        /// Lower bound before clamping.
        estimated_low: i64,
    },
    /// One bisection midpoint was examined.
    MidpointProbed {
        /// Midpoint sequence value.
        sequence: i64,
        /// Lower bound before the probe.
        low: i64,
        /// Upper bound before the probe.
        high: i64,
        /// Probe classification.
        outcome: MidpointOutcome,
    },
    /// Final descriptor selected.
    Selected {
        /// Selected sequence.
        sequence: SequenceNumber,
        /// Selected descriptor URL.
        url: String,
        /// Relation to the target instant.
        outcome: Outcome,
    },
}

/// Diagnostics sink for lookups.
pub trait Reporter: Send + Sync {
    /// Records a lookup event.
    fn report(&self, event: &LocateEvent);
}
