// crates/replication-locator-core/src/runtime/locator.rs
// ============================================================================
// Module: Locator
// Description: The `locate` operation tying resolution, reads, and bisection.
// Purpose: Turn (period, timestamp, base URL, layout) into a descriptor URL.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`Locator::locate`] runs one stateless lookup:
//! 1. normalize the target timestamp and resolve the descriptor directory;
//! 2. probe the directory, then read `state.txt` for the latest sequence;
//! 3. return the latest sequence when the target is in the future, otherwise
//!    estimate a window and bisect it;
//! 4. probe the selected descriptor before returning its URL.
//!
//! Every step reports to the injected [`Reporter`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::base_url::resolve_base_url;
use crate::core::descriptor::STATE_FILE_NAME;
use crate::core::error::LocateError;
use crate::core::period::Period;
use crate::core::sequence::SequenceNumber;
use crate::core::timestamp::normalize_timestamp;
use crate::interfaces::LocateEvent;
use crate::interfaces::Outcome;
use crate::interfaces::ProbeTarget;
use crate::interfaces::Reporter;
use crate::interfaces::Transport;
use crate::runtime::bisect::BisectionEngine;
use crate::runtime::bisect::SearchWindow;
use crate::runtime::probe::ProbeSettings;
use crate::runtime::probe::probe_accessible;
use crate::runtime::reader::read_descriptor;

// ============================================================================
// SECTION: Request / Response
// ============================================================================

/// Inputs of one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateRequest {
    /// Replication period.
    pub period: Period,
    /// Target UTC timestamp text.
    pub timestamp: String,
    /// Replication URL as supplied by the caller.
    pub base_url: String,
    /// Whether the period is a path segment beneath the base URL.
    pub osm_like: bool,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Descriptor URL of the selected sequence.
    pub url: String,
    /// Selected sequence.
    pub sequence: SequenceNumber,
    /// Relation of the selected sequence to the target.
    pub outcome: Outcome,
}

/// Probe budgets used by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorSettings {
    /// Probe applied to the descriptor directory before any reads.
    pub base_probe: ProbeSettings,
    /// Probe applied to the selected descriptor before returning it.
    pub result_probe: ProbeSettings,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            base_probe: ProbeSettings::base_directory(),
            result_probe: ProbeSettings::result(),
        }
    }
}

// ============================================================================
// SECTION: Locator
// ============================================================================

/// Stateless replication sequence locator.
pub struct Locator<'a> {
    /// Remote read seam.
    transport: &'a dyn Transport,
    /// Diagnostics sink.
    reporter: &'a dyn Reporter,
    /// Probe budgets.
    settings: LocatorSettings,
}

impl<'a> Locator<'a> {
    /// Creates a locator with default probe settings.
    #[must_use]
    pub fn new(transport: &'a dyn Transport, reporter: &'a dyn Reporter) -> Self {
        Self {
            transport,
            reporter,
            settings: LocatorSettings::default(),
        }
    }

    /// Replaces the probe settings.
    #[must_use]
    pub const fn with_settings(mut self, settings: LocatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Finds the newest descriptor at or before the requested timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError`] when the inputs are invalid, the directory or
    /// result is unreachable, `state.txt` cannot be read, or no sequence
    /// qualifies.
    pub fn locate(&self, request: &LocateRequest) -> Result<Located, LocateError> {
        let target_epoch = normalize_timestamp(&request.timestamp)?;
        let base_url = resolve_base_url(&request.base_url, request.period, request.osm_like)?;
        self.reporter.report(&LocateEvent::BaseResolved {
            input: request.base_url.clone(),
            base_url: base_url.clone(),
        });
        probe_accessible(
            self.transport,
            self.reporter,
            ProbeTarget::BaseDirectory,
            &base_url,
            self.settings.base_probe,
        )?;

        let state = read_descriptor(self.transport, &format!("{base_url}{STATE_FILE_NAME}"))?;
        let latest = state.sequence_number()?;
        let latest_epoch = state.timestamp_epoch()?;
        self.reporter.report(&LocateEvent::LatestState {
            sequence: latest,
            epoch: latest_epoch,
            target_epoch,
        });

        let (sequence, outcome) = if target_epoch > latest_epoch {
            self.reporter.report(&LocateEvent::FutureTarget {
                target_epoch,
                latest_epoch,
            });
            (latest, Outcome::FutureApproximation)
        } else {
            let window = self.initial_window(latest, latest_epoch, target_epoch, request.period);
            let best = BisectionEngine::new(self.transport, self.reporter, &base_url)
                .search(window, target_epoch)?;
            (best, Outcome::Exact)
        };

        let url = sequence.descriptor_url(&base_url);
        probe_accessible(
            self.transport,
            self.reporter,
            ProbeTarget::Result,
            &url,
            self.settings.result_probe,
        )?;
        self.reporter.report(&LocateEvent::Selected {
            sequence,
            url: url.clone(),
            outcome,
        });
        Ok(Located {
            url,
            sequence,
            outcome,
        })
    }

    /// Estimates the bisection window and clamps a negative lower bound.
    fn initial_window(
        &self,
        latest: SequenceNumber,
        latest_epoch: i64,
        target_epoch: i64,
        period: Period,
    ) -> SearchWindow {
        let estimated = SearchWindow::estimate(latest, latest_epoch, target_epoch, period);
        self.reporter.report(&LocateEvent::WindowEstimated {
            low: estimated.low,
            high: estimated.high,
        });
        let window = estimated.clamped();
        if window != estimated {
            self.reporter.report(&LocateEvent::WindowClamped {
                estimated_low: estimated.low,
            });
        }
        window
    }
}
