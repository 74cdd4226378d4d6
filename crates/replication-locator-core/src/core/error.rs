// crates/replication-locator-core/src/core/error.rs
// ============================================================================
// Module: Locate Errors
// Description: Error taxonomy for replication sequence lookups.
// Purpose: Give callers stable, matchable failure kinds.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`LocateError`] covers every fatal failure of a lookup. Failures that occur
//! while probing bisection midpoints never surface here; the engine absorbs them
//! and narrows the window instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::interfaces::TransportError;

// ============================================================================
// SECTION: Locate Error
// ============================================================================

/// Errors emitted by the replication locator.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Timestamp text matched none of the accepted formats.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
    /// Period name is not one of minute, hour, day.
    #[error("invalid replication period: {0:?}")]
    InvalidPeriod(String),
    /// Base URL normalization produced an unusable directory.
    #[error("invalid base url: {0:?}")]
    InvalidBaseUrl(String),
    /// Descriptor could not be fetched.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// Descriptor URL.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
    /// Accessibility probe failed on every attempt.
    #[error("{url} unreachable after {attempts} attempt(s)")]
    Unreachable {
        /// Probed URL.
        url: String,
        /// Number of attempts performed.
        attempts: u32,
    },
    /// Descriptor field missing or empty after cleanup.
    #[error("field {field:?} not found in {url}")]
    FieldNotFound {
        /// Requested field name.
        field: String,
        /// Descriptor URL.
        url: String,
    },
    /// Sequence number outside `0..=999_999_999` or not an integer.
    #[error("invalid sequence number: {0}")]
    InvalidSequenceNumber(String),
    /// Bisection finished without any sequence at or before the target.
    #[error("no sequence found with timestamp at or before {target}")]
    NoSuitableSequence {
        /// Target instant rendered for diagnostics.
        target: String,
    },
}
