// crates/replication-locator-core/src/runtime/bisect.rs
// ============================================================================
// Module: Bisection Engine
// Description: Binary search over remotely published sequence descriptors.
// Purpose: Find the newest sequence at or before a target with O(log n) reads.
// Dependencies: crate::{core, interfaces}, serde
// ============================================================================

//! ## Overview
//! The engine bisects an inclusive `[low, high]` window of sequence numbers.
//! Each midpoint descriptor is fetched and its timestamp compared with the
//! target; the newest midpoint at or before the target is remembered.
//! Invariants:
//! - The window shrinks on every iteration, so the loop always terminates.
//! - A midpoint that cannot be read or parsed is treated as lying after the
//!   publishing frontier: only `high` moves. Descriptors are published in
//!   increasing order, so gaps only occur at the leading edge.
//! - A malformed but reachable descriptor is treated the same way as a missing
//!   one; the two cases are only distinguished in the reported event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::descriptor::TIMESTAMP_FIELD;
use crate::core::error::LocateError;
use crate::core::period::Period;
use crate::core::sequence::SequenceNumber;
use crate::core::timestamp::format_epoch;
use crate::core::timestamp::normalize_timestamp;
use crate::interfaces::LocateEvent;
use crate::interfaces::MidpointOutcome;
use crate::interfaces::Reporter;
use crate::interfaces::Transport;
use crate::runtime::reader::read_descriptor;

// ============================================================================
// SECTION: Search Window
// ============================================================================

/// Inclusive bisection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchWindow {
    /// Inclusive lower bound.
    pub low: i64,
    /// Inclusive upper bound.
    pub high: i64,
}

impl SearchWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self {
            low,
            high,
        }
    }

    /// Estimates the window for a target before the latest descriptor.
    ///
    /// Assumes one sequence per period: the elapsed time divided by the period
    /// length approximates how many sequences lie between target and latest, and
    /// one extra sequence of margin is added below. The lower bound may be
    /// negative; see [`Self::clamped`].
    #[must_use]
    pub fn estimate(
        latest: SequenceNumber,
        latest_epoch: i64,
        target_epoch: i64,
        period: Period,
    ) -> Self {
        let high = i64::from(latest);
        let elapsed = latest_epoch.saturating_sub(target_epoch).max(0);
        let gap = elapsed / period.seconds();
        Self {
            low: high.saturating_sub(gap).saturating_sub(1),
            high,
        }
    }

    /// Returns the window with a negative lower bound raised to zero.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self {
            low: if self.low < 0 { 0 } else { self.low },
            high: self.high,
        }
    }

    /// Returns true when the window contains no sequence.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.low > self.high
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Bisection engine bound to one descriptor directory.
pub struct BisectionEngine<'a> {
    /// Transport used for midpoint reads.
    transport: &'a dyn Transport,
    /// Diagnostics sink.
    reporter: &'a dyn Reporter,
    /// Descriptor directory URL.
    base_url: &'a str,
}

impl<'a> BisectionEngine<'a> {
    /// Creates an engine for the descriptor directory `base_url`.
    #[must_use]
    pub const fn new(
        transport: &'a dyn Transport,
        reporter: &'a dyn Reporter,
        base_url: &'a str,
    ) -> Self {
        Self {
            transport,
            reporter,
            base_url,
        }
    }

    /// Returns the newest sequence in `window` whose timestamp is at or before
    /// `target_epoch`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::NoSuitableSequence`] when no readable sequence in
    /// the window qualifies.
    pub fn search(
        &self,
        window: SearchWindow,
        target_epoch: i64,
    ) -> Result<SequenceNumber, LocateError> {
        let mut low = window.low;
        let mut high = window.high;
        let mut best: Option<SequenceNumber> = None;

        while low <= high {
            let mid = floor_midpoint(low, high);
            let outcome = match self.examine(mid) {
                Ok((sequence, epoch)) if epoch <= target_epoch => {
                    best = Some(sequence);
                    MidpointOutcome::AtOrBefore {
                        epoch,
                    }
                }
                Ok((_, epoch)) => MidpointOutcome::After {
                    epoch,
                },
                Err(failure) => failure,
            };
            let advance_low = matches!(outcome, MidpointOutcome::AtOrBefore { .. });
            self.reporter.report(&LocateEvent::MidpointProbed {
                sequence: mid,
                low,
                high,
                outcome,
            });
            if advance_low {
                low = mid.saturating_add(1);
            } else {
                let Some(next_high) = mid.checked_sub(1) else {
                    break;
                };
                high = next_high;
            }
        }

        best.ok_or_else(|| LocateError::NoSuitableSequence {
            target: format_epoch(target_epoch).unwrap_or_else(|| target_epoch.to_string()),
        })
    }

    /// Reads the midpoint descriptor and returns its sequence and epoch.
    fn examine(&self, mid: i64) -> Result<(SequenceNumber, i64), MidpointOutcome> {
        let sequence = SequenceNumber::try_from(mid).map_err(|err| {
            MidpointOutcome::Unavailable {
                reason: err.to_string(),
            }
        })?;
        let url = sequence.descriptor_url(self.base_url);
        let descriptor =
            read_descriptor(self.transport, &url).map_err(|err| MidpointOutcome::Unavailable {
                reason: err.to_string(),
            })?;
        let epoch = descriptor
            .field(TIMESTAMP_FIELD)
            .and_then(|value| normalize_timestamp(&value))
            .map_err(|err| MidpointOutcome::Malformed {
                reason: err.to_string(),
            })?;
        Ok((sequence, epoch))
    }
}

/// Returns `floor((low + high) / 2)` without overflow.
fn floor_midpoint(low: i64, high: i64) -> i64 {
    let sum = i128::from(low) + i128::from(high);
    i64::try_from(sum.div_euclid(2)).unwrap_or(low)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
