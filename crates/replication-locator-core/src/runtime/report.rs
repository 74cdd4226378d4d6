// crates/replication-locator-core/src/runtime/report.rs
// ============================================================================
// Module: Reporters
// Description: Reference reporter implementations for lookup diagnostics.
// Purpose: Emit lookup events as text lines, JSON lines, or not at all.
// Dependencies: crate::{core, interfaces}, serde_json, std
// ============================================================================

//! ## Overview
//! Reporters are best-effort: write failures and poisoned writers are ignored
//! so diagnostics can never abort a lookup. Writers are guarded by a mutex so a
//! reporter can be shared across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::timestamp::format_epoch;
use crate::interfaces::LocateEvent;
use crate::interfaces::MidpointOutcome;
use crate::interfaces::Reporter;

// ============================================================================
// SECTION: No-op Reporter
// ============================================================================

/// Reporter that discards every event.
///
/// # Invariants
/// - Events are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _event: &LocateEvent) {}
}

// ============================================================================
// SECTION: Text Reporter
// ============================================================================

/// Reporter writing one human-readable line per event.
pub struct TextReporter<W: Write + Send> {
    /// Output writer for diagnostic lines.
    writer: Mutex<W>,
}

impl<W: Write + Send> TextReporter<W> {
    /// Creates a text reporter writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Reporter for TextReporter<W> {
    fn report(&self, event: &LocateEvent) {
        let line = render_text(event);
        if let Ok(mut guard) = self.writer.lock() {
            let _ = writeln!(guard, "[locate] {line}");
        }
    }
}

/// Renders an event as a single diagnostic line.
fn render_text(event: &LocateEvent) -> String {
    match event {
        LocateEvent::BaseResolved {
            input,
            base_url,
        } => format!("descriptor directory {base_url} (from {input})"),
        LocateEvent::ProbeAttempt {
            target,
            url,
            attempt,
            max_attempts,
            error,
        } => match error {
            None => format!("probe {} {url}: ok (attempt {attempt}/{max_attempts})", target.as_str()),
            Some(error) => format!(
                "probe {} {url}: {error} (attempt {attempt}/{max_attempts})",
                target.as_str()
            ),
        },
        LocateEvent::LatestState {
            sequence,
            epoch,
            target_epoch,
        } => format!(
            "latest sequence {sequence} at {}, target {}",
            render_epoch(*epoch),
            render_epoch(*target_epoch)
        ),
        LocateEvent::FutureTarget {
            target_epoch,
            latest_epoch,
        } => format!(
            "target {} is after latest state {}; using latest sequence",
            render_epoch(*target_epoch),
            render_epoch(*latest_epoch)
        ),
        LocateEvent::WindowEstimated {
            low,
            high,
        } => format!("search window [{low}, {high}]"),
        LocateEvent::WindowClamped {
            estimated_low,
        } => format!("estimated lower bound {estimated_low} clamped to 0"),
        LocateEvent::MidpointProbed {
            sequence,
            low,
            high,
            outcome,
        } => {
            let verdict = match outcome {
                MidpointOutcome::AtOrBefore {
                    epoch,
                } => format!("at or before target ({})", render_epoch(*epoch)),
                MidpointOutcome::After {
                    epoch,
                } => format!("after target ({})", render_epoch(*epoch)),
                MidpointOutcome::Unavailable {
                    reason,
                } => format!("unavailable: {reason}"),
                MidpointOutcome::Malformed {
                    reason,
                } => format!("malformed: {reason}"),
            };
            format!("sequence {sequence} in [{low}, {high}]: {verdict}")
        }
        LocateEvent::Selected {
            sequence,
            url,
            outcome,
        } => format!("selected sequence {sequence} ({}): {url}", outcome.as_str()),
    }
}

/// Renders epoch seconds in UTC, falling back to the raw number.
fn render_epoch(epoch: i64) -> String {
    format_epoch(epoch).unwrap_or_else(|| epoch.to_string())
}

// ============================================================================
// SECTION: JSON Lines Reporter
// ============================================================================

/// Reporter writing one JSON object per event.
pub struct JsonLinesReporter<W: Write + Send> {
    /// Output writer for JSON records.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesReporter<W> {
    /// Creates a JSON lines reporter writing to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Reporter for JsonLinesReporter<W> {
    fn report(&self, event: &LocateEvent) {
        let Ok(mut guard) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *guard, event).is_ok() {
            let _ = guard.write_all(b"\n");
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
